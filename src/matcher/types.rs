// types.rs
use std::sync::Arc;
use serde::{Serialize, Deserialize};

/// One reference word and whether the recitation got it right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffEntry {
    pub word: String,
    pub ok: bool,
}

/// Outcome of comparing a recitation transcript with a reference verse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub jaccard: f64,
    pub accuracy: u32,
    pub diff: Vec<DiffEntry>,
    pub ref_tokens: Arc<Vec<String>>,
    pub hyp_tokens: Vec<String>,
}

impl MatchResult {
    /// Reference words the recitation missed or got wrong, in order.
    pub fn missed_words(&self) -> impl Iterator<Item = &str> {
        self.diff.iter().filter(|entry| !entry.ok).map(|entry| entry.word.as_str())
    }
}

/// Minimal shape a renderer needs to colour a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Highlight<'a> {
    pub word: &'a str,
    pub ok: bool,
}

/// Score of one verse when locating a transcript within a surah.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerseScore {
    pub surah: u16,
    pub ayah: u16,
    pub result: MatchResult,
}

/// A recorded recitation attempt to be scored against a verse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attempt {
    pub ayah: u16,
    pub transcript: String,
}

/// Per-attempt outcome; `result` is absent when the verse could not be found.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptScore {
    pub ayah: u16,
    pub result: Option<MatchResult>,
    pub error: Option<String>,
}
