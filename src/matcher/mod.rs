pub mod algorithms;
pub mod alignment;
pub mod types;
pub mod recitation;
pub mod parallel;
// Re-export the main types
pub use self::algorithms::{edit_distance, jaccard_similarity, accuracy, WordTolerance};
pub use self::alignment::{diff_align, WordAligner, PositionalAligner, SequenceAligner};
pub use self::recitation::{RecitationMatcher, match_text, project_highlights};
pub use self::parallel::{locate_verse, score_attempts};
pub use self::types::{
    DiffEntry,
    MatchResult,
    Highlight,
    VerseScore,
    Attempt,
    AttemptScore,
};
