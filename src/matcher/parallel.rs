use std::cmp::Ordering;
use log::{debug, info, warn};
use rayon::prelude::*;

use crate::cache::Clock;
use crate::reference::SurahText;
use super::recitation::RecitationMatcher;
use super::types::{Attempt, AttemptScore, VerseScore};

/// Scores `transcript` against every verse of `surah` and ranks them,
/// best first: higher jaccard, then higher accuracy, then lower verse number.
pub fn locate_verse<C: Clock>(
    matcher: &RecitationMatcher<C>,
    surah: &SurahText,
    transcript: &str,
) -> Vec<VerseScore> {
    let mut scores: Vec<VerseScore> = surah.verses
        .par_iter()
        .map(|verse| VerseScore {
            surah: surah.number,
            ayah: verse.number,
            result: matcher.match_text(&verse.text, transcript),
        })
        .collect();

    scores.sort_by(|a, b| {
        b.result.jaccard.partial_cmp(&a.result.jaccard).unwrap_or(Ordering::Equal)
            .then_with(|| b.result.accuracy.cmp(&a.result.accuracy))
            .then_with(|| a.ayah.cmp(&b.ayah))
    });

    if let Some(best) = scores.first() {
        debug!("Best verse for transcript in surah {}: ayah {} (jaccard {:.2}, accuracy {}%)",
            surah.number, best.ayah, best.result.jaccard, best.result.accuracy);
    }
    scores
}

/// Scores recorded attempts in parallel, keeping input order. `on_done` is
/// called once per attempt, from worker threads.
pub fn score_attempts<C, F>(
    matcher: &RecitationMatcher<C>,
    surah: &SurahText,
    attempts: &[Attempt],
    on_done: F,
) -> Vec<AttemptScore>
where
    C: Clock,
    F: Fn() + Sync,
{
    info!("Scoring {} attempts against surah {}", attempts.len(), surah.number);

    attempts
        .par_iter()
        .map(|attempt| {
            let score = match surah.verse(attempt.ayah) {
                Some(verse) => AttemptScore {
                    ayah: attempt.ayah,
                    result: Some(matcher.match_text(&verse.text, &attempt.transcript)),
                    error: None,
                },
                None => {
                    warn!("Attempt names ayah {} which surah {} does not have", attempt.ayah, surah.number);
                    AttemptScore {
                        ayah: attempt.ayah,
                        result: None,
                        error: Some(format!("Surah {} has no ayah {}", surah.number, attempt.ayah)),
                    }
                }
            };
            on_done();
            score
        })
        .collect()
}
