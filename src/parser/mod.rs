pub mod arabic;

/// Turns raw text into comparison-ready tokens.
pub trait TextNormalizer: Sync + Send {
    /// Canonical form of `text`. Must be idempotent.
    fn normalize(&self, text: &str) -> String;

    /// Normalized words, never containing an empty token.
    fn tokenize(&self, text: &str) -> Vec<String> {
        self.normalize(text)
            .split(' ')
            .filter(|word| !word.is_empty())
            .map(str::to_string)
            .collect()
    }
}

pub use self::arabic::{ArabicNormalizer, normalize, tokenize};
