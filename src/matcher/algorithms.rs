use ahash::AHashSet;
use serde::{Serialize, Deserialize};
use std::hash::Hash;
use crate::config::subsystems::MatcherConfig;
use super::types::DiffEntry;

/// Minimum number of single-character insertions, deletions and
/// substitutions turning `source` into `target`. Operates on chars, not bytes.
pub fn edit_distance(source: &str, target: &str) -> usize {
    let source_chars: Vec<char> = source.chars().collect();
    let target_chars: Vec<char> = target.chars().collect();

    let mut prev: Vec<usize> = (0..=target_chars.len()).collect();
    let mut curr = vec![0; target_chars.len() + 1];

    for i in 1..=source_chars.len() {
        curr[0] = i;
        for j in 1..=target_chars.len() {
            let cost = if source_chars[i - 1] == target_chars[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1)          // deletion
                .min(curr[j - 1] + 1)        // insertion
                .min(prev[j - 1] + cost);    // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[target_chars.len()]
}

/// Jaccard index of the two sequences taken as sets. Two empty sets score 0.
pub fn jaccard_similarity<T: Eq + Hash>(set_a: &[T], set_b: &[T]) -> f64 {
    let a: AHashSet<&T> = set_a.iter().collect();
    let b: AHashSet<&T> = set_b.iter().collect();

    let intersection = a.intersection(&b).count();
    let union = a.len() + b.len() - intersection;

    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

/// Share of accepted words as a rounded percentage; 0 for an empty diff.
pub fn accuracy(diff: &[DiffEntry]) -> u32 {
    if diff.is_empty() {
        return 0;
    }
    let ok = diff.iter().filter(|entry| entry.ok).count();
    // round(100 * ok / len), half rounding up, without going through floats
    ((200 * ok + diff.len()) / (2 * diff.len())) as u32
}

/// Decides whether a hypothesis word is close enough to a reference word.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WordTolerance {
    pub max_distance: usize,
    /// Extra allowance proportional to the reference word length; 0 disables it.
    pub relative: f64,
}

impl Default for WordTolerance {
    fn default() -> Self {
        Self { max_distance: 1, relative: 0.0 }
    }
}

impl WordTolerance {
    pub fn fixed(max_distance: usize) -> Self {
        Self { max_distance, relative: 0.0 }
    }

    pub fn from_config(config: &MatcherConfig) -> Self {
        Self {
            max_distance: config.max_word_distance,
            relative: config.relative_word_distance,
        }
    }

    pub fn allowed_distance(&self, reference_word: &str) -> usize {
        let scaled = (self.relative * reference_word.chars().count() as f64).floor() as usize;
        self.max_distance.max(scaled)
    }

    pub fn accepts(&self, reference_word: &str, hypothesis_word: &str) -> bool {
        reference_word == hypothesis_word
            || edit_distance(reference_word, hypothesis_word) <= self.allowed_distance(reference_word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_distance_basics() {
        assert_eq!(edit_distance("", ""), 0);
        assert_eq!(edit_distance("كتاب", ""), 4);
        assert_eq!(edit_distance("", "كتب"), 3);
        assert_eq!(edit_distance("كتاب", "كتاب"), 0);
        assert_eq!(edit_distance("كتاب", "كتب"), 1);
        assert_eq!(edit_distance("كتاب", "كتبوا"), 3);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
    }

    #[test]
    fn test_edit_distance_symmetric_and_triangle() {
        let words = ["الرحمن", "الرحيم", "رحمن", "الله", "بسم", ""];
        for a in words {
            for b in words {
                assert_eq!(edit_distance(a, b), edit_distance(b, a));
                for c in words {
                    assert!(edit_distance(a, c) <= edit_distance(a, b) + edit_distance(b, c));
                }
            }
        }
    }

    #[test]
    fn test_jaccard() {
        let a = ["بسم", "الله", "الله"];
        let b = ["الله", "الرحمن"];
        assert!((jaccard_similarity(&a, &b) - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(jaccard_similarity(&a, &b), jaccard_similarity(&b, &a));
        assert_eq!(jaccard_similarity(&a, &a), 1.0);

        let empty: [&str; 0] = [];
        assert_eq!(jaccard_similarity(&empty, &empty), 0.0);
        assert_eq!(jaccard_similarity(&a, &empty), 0.0);
    }

    #[test]
    fn test_accuracy_rounding() {
        let entry = |ok| DiffEntry { word: "w".to_string(), ok };
        assert_eq!(accuracy(&[]), 0);
        assert_eq!(accuracy(&[entry(true), entry(true), entry(false)]), 67);
        assert_eq!(accuracy(&[entry(true), entry(false), entry(false)]), 33);
        assert_eq!(accuracy(&[entry(true), entry(false)]), 50);
        // 1/8 = 12.5 rounds up
        let mut diff = vec![entry(true)];
        diff.extend((0..7).map(|_| entry(false)));
        assert_eq!(accuracy(&diff), 13);
    }

    #[test]
    fn test_tolerance() {
        let default = WordTolerance::default();
        assert!(default.accepts("كتاب", "كتب"));
        assert!(!default.accepts("كتاب", "كتبوا"));

        let strict = WordTolerance::fixed(0);
        assert!(!strict.accepts("كتاب", "كتب"));
        assert!(strict.accepts("كتاب", "كتاب"));

        // 6 chars * 0.34 = 2.04 -> 2 edits allowed
        let relative = WordTolerance { max_distance: 1, relative: 0.34 };
        assert_eq!(relative.allowed_distance("الرحمن"), 2);
        assert_eq!(relative.allowed_distance("بسم"), 1);
        assert!(relative.accepts("الرحمن", "الرحيم"));
    }
}
