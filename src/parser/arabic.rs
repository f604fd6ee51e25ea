// Arabic normalizer: strips harakat, Qur'anic annotation marks and tatweel,
// folds hamza-bearing letter variants, and splits on whitespace.

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;
use crate::config::subsystems::ParserConfig;

use super::TextNormalizer;

lazy_static! {
    // Harakat plus superscript alef, and the Qur'anic small high/low marks
    // including the small waw/ya of silah.
    // U+06DD, U+06DE and U+06E9 are standalone symbols, handled as punctuation.
    static ref DIACRITICS: Regex = Regex::new(
        r"[\u{064B}-\u{065F}\u{0670}\u{06D6}-\u{06DC}\u{06DF}-\u{06E8}\u{06EA}-\u{06ED}]"
    ).unwrap();
    static ref TATWEEL: Regex = Regex::new(r"\u{0640}").unwrap();
    static ref PUNCTUATION: Regex = Regex::new(
        r#"[\u{060C}\u{061B}\u{061F}\u{066A}-\u{066D}\u{06D4}\u{06DD}\u{06DE}\u{06E9}.,:;!?"'\-–—()\[\]{}«»]"#
    ).unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

#[derive(Debug, Clone, Default)]
pub struct ArabicNormalizer {
    settings: ParserConfig,
}

impl ArabicNormalizer {
    pub fn new(settings: ParserConfig) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ParserConfig {
        &self.settings
    }

    fn normalize_char(&self, c: char) -> char {
        match c {
            'أ' | 'إ' | 'ٱ' | 'آ' if self.settings.normalize_arabic => 'ا',
            'ى' | 'ئ' if self.settings.normalize_arabic => 'ي',
            'ؤ' if self.settings.normalize_arabic => 'و',
            'ة' if self.settings.fold_ta_marbuta => 'ه',
            _ => c,
        }
    }
}

impl TextNormalizer for ArabicNormalizer {
    fn normalize(&self, text: &str) -> String {
        let mut s = if self.settings.remove_diacritics {
            DIACRITICS.replace_all(text, "").into_owned()
        } else {
            text.to_string()
        };

        if self.settings.remove_tatweel {
            s = TATWEEL.replace_all(&s, "").into_owned();
        }

        // Punctuation becomes a space so adjacent words never merge
        s = PUNCTUATION.replace_all(&s, " ").into_owned();

        let folded: String = s.chars().map(|c| self.normalize_char(c)).collect();
        let collapsed = WHITESPACE.replace_all(&folded, " ");
        let normalized = collapsed.trim().to_string();

        trace!("Normalized {:?} -> {:?}", text, normalized);
        normalized
    }
}

/// Normalizes `text` with the default settings.
pub fn normalize(text: &str) -> String {
    ArabicNormalizer::default().normalize(text)
}

/// Tokenizes `text` with the default settings.
pub fn tokenize(text: &str) -> Vec<String> {
    ArabicNormalizer::default().tokenize(text)
}
