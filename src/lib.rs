//! tasmi scores a spoken Qur'an recitation against the reference verse.
//! Arabic text on both sides is normalized and tokenized, then compared word
//! by word with a small edit-distance tolerance and as a set of words.

// Module declarations
pub mod error;
pub mod config;
pub mod parser;
pub mod matcher;
pub mod cache;
pub mod reference;
pub mod report;
pub mod utils;

// Re-exports
pub use error::{Error, Result};
pub use config::TasmiConfig;
pub use parser::{normalize, tokenize, ArabicNormalizer, TextNormalizer};
pub use matcher::{
    edit_distance,
    jaccard_similarity,
    diff_align,
    accuracy,
    match_text,
    project_highlights,
    RecitationMatcher,
    DiffEntry,
    MatchResult,
    Highlight,
};
pub use reference::{SurahText, Verse};
