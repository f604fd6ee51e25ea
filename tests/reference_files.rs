use std::io::Write;
use tempfile::NamedTempFile;
use tasmi::{RecitationMatcher, SurahText, TasmiConfig, Error};
use tasmi::config::subsystems::AlignmentStrategy;
use tasmi::matcher::{locate_verse, score_attempts, Attempt};

const AL_FATIHA: &str = r#"{
    "code": 200,
    "status": "OK",
    "data": {
        "number": 1,
        "name": "سُورَةُ ٱلْفَاتِحَةِ",
        "englishName": "Al-Faatiha",
        "numberOfAyahs": 7,
        "ayahs": [
            {"number": 1, "numberInSurah": 1, "text": "بِسْمِ ٱللَّهِ ٱلرَّحْمَٰنِ ٱلرَّحِيمِ"},
            {"number": 2, "numberInSurah": 2, "text": "ٱلْحَمْدُ لِلَّهِ رَبِّ ٱلْعَٰلَمِينَ"},
            {"number": 3, "numberInSurah": 3, "text": "ٱلرَّحْمَٰنِ ٱلرَّحِيمِ"},
            {"number": 4, "numberInSurah": 4, "text": "مَٰلِكِ يَوْمِ ٱلدِّينِ"},
            {"number": 5, "numberInSurah": 5, "text": "إِيَّاكَ نَعْبُدُ وَإِيَّاكَ نَسْتَعِينُ"},
            {"number": 6, "numberInSurah": 6, "text": "ٱهْدِنَا ٱلصِّرَٰطَ ٱلْمُسْتَقِيمَ"},
            {"number": 7, "numberInSurah": 7, "text": "صِرَٰطَ ٱلَّذِينَ أَنْعَمْتَ عَلَيْهِمْ غَيْرِ ٱلْمَغْضُوبِ عَلَيْهِمْ وَلَا ٱلضَّآلِّينَ"}
        ]
    }
}"#;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn surah_file_round_trip_into_locate() {
    let surah_file = write_temp(AL_FATIHA);
    let surah = SurahText::from_file(surah_file.path()).unwrap();
    assert_eq!(surah.verses.len(), 7);

    let matcher = RecitationMatcher::default();
    let ranked = locate_verse(&matcher, &surah, "اياك نعبد واياك نستعين");
    assert_eq!(ranked[0].ayah, 5);
    assert_eq!(ranked[0].result.accuracy, 100);
    assert_eq!(ranked[0].result.jaccard, 1.0);
}

#[test]
fn configured_matcher_scores_session() {
    let surah = SurahText::from_json(AL_FATIHA).unwrap();
    let ini = write_temp("[matcher]\nalignment = sequence\nmax_word_distance = 1\n\n[processor]\nthreads = 2\n");
    let config = TasmiConfig::from_ini(ini.path()).unwrap();
    assert_eq!(config.matcher.alignment, AlignmentStrategy::Sequence);

    let matcher = RecitationMatcher::new(&config);
    let attempts = vec![
        Attempt { ayah: 2, transcript: "الحمد رب العالمين".to_string() },
        Attempt { ayah: 4, transcript: "مالك يوم الدين".to_string() },
        Attempt { ayah: 8, transcript: "امين".to_string() },
    ];

    let pool = config.processor.build_thread_pool().unwrap();
    let scores = pool.install(|| score_attempts(&matcher, &surah, &attempts, || {}));

    let first = scores[0].result.as_ref().unwrap();
    assert_eq!(first.accuracy, 75);
    assert_eq!(first.missed_words().collect::<Vec<_>>(), vec!["لله"]);

    // مالك against ملك is one insertion
    assert_eq!(scores[1].result.as_ref().unwrap().accuracy, 100);

    assert!(scores[2].result.is_none());
}

#[test]
fn invalid_payload_is_rejected_at_the_boundary() {
    let truncated = AL_FATIHA.replace("\"numberOfAyahs\": 7", "\"numberOfAyahs\": 6");
    let file = write_temp(&truncated);
    assert!(matches!(SurahText::from_file(file.path()), Err(Error::Reference(_))));
}
