use log::trace;
use crate::config::subsystems::AlignmentStrategy;
use super::algorithms::{edit_distance, WordTolerance};
use super::types::DiffEntry;

/// Pairs reference words with hypothesis words and marks each reference word
/// as recited correctly or not. Every implementation emits entries in
/// reference order and never emits a word that only the hypothesis contains.
pub trait WordAligner: Send + Sync {
    fn strategy(&self) -> AlignmentStrategy;

    fn align(&self, reference: &[String], hypothesis: &[String]) -> Vec<DiffEntry>;
}

pub fn aligner_for(strategy: AlignmentStrategy, tolerance: WordTolerance) -> Box<dyn WordAligner> {
    match strategy {
        AlignmentStrategy::Positional => Box::new(PositionalAligner::new(tolerance)),
        AlignmentStrategy::Sequence => Box::new(SequenceAligner::new(tolerance)),
    }
}

/// Compares word `i` of the reference with word `i` of the hypothesis.
///
/// A dropped or inserted word shifts every later position, so everything
/// after it is likely reported as wrong. Hypothesis words past the end of the
/// reference are ignored.
#[derive(Debug, Clone, Default)]
pub struct PositionalAligner {
    tolerance: WordTolerance,
}

impl PositionalAligner {
    pub fn new(tolerance: WordTolerance) -> Self {
        Self { tolerance }
    }
}

impl WordAligner for PositionalAligner {
    fn strategy(&self) -> AlignmentStrategy {
        AlignmentStrategy::Positional
    }

    fn align(&self, reference: &[String], hypothesis: &[String]) -> Vec<DiffEntry> {
        let max_len = reference.len().max(hypothesis.len());
        let mut out = Vec::with_capacity(reference.len());

        for i in 0..max_len {
            let Some(word) = reference.get(i) else {
                continue;
            };
            let ok = match hypothesis.get(i) {
                None => false,
                Some(heard) => self.tolerance.accepts(word, heard),
            };
            out.push(DiffEntry { word: word.clone(), ok });
        }

        out
    }
}

/// The positional rule with the default one-edit tolerance.
pub fn diff_align(reference: &[String], hypothesis: &[String]) -> Vec<DiffEntry> {
    PositionalAligner::default().align(reference, hypothesis)
}

const EXACT_COST: u32 = 0;
const NEAR_COST: u32 = 1;
const MISMATCH_COST: u32 = 3;
const GAP_COST: u32 = 2;

/// Needleman-Wunsch over words. Resynchronises after a dropped or inserted
/// word instead of cascading mismatches. A mismatch costs less than two gaps,
/// so a wrong word is preferred over a skip plus an insertion.
#[derive(Debug, Clone, Default)]
pub struct SequenceAligner {
    tolerance: WordTolerance,
}

impl SequenceAligner {
    pub fn new(tolerance: WordTolerance) -> Self {
        Self { tolerance }
    }

    fn pair_cost(&self, reference: &str, heard: &str) -> u32 {
        if reference == heard {
            EXACT_COST
        } else if edit_distance(reference, heard) <= self.tolerance.allowed_distance(reference) {
            NEAR_COST
        } else {
            MISMATCH_COST
        }
    }
}

impl WordAligner for SequenceAligner {
    fn strategy(&self) -> AlignmentStrategy {
        AlignmentStrategy::Sequence
    }

    fn align(&self, reference: &[String], hypothesis: &[String]) -> Vec<DiffEntry> {
        let m = reference.len();
        let n = hypothesis.len();

        let pair: Vec<Vec<u32>> = reference.iter()
            .map(|word| hypothesis.iter().map(|heard| self.pair_cost(word, heard)).collect())
            .collect();

        let mut cost = vec![vec![0u32; n + 1]; m + 1];
        for (i, row) in cost.iter_mut().enumerate() {
            row[0] = i as u32 * GAP_COST;
        }
        for j in 0..=n {
            cost[0][j] = j as u32 * GAP_COST;
        }

        for i in 1..=m {
            for j in 1..=n {
                cost[i][j] = (cost[i - 1][j - 1] + pair[i - 1][j - 1])
                    .min(cost[i - 1][j] + GAP_COST)     // reference word skipped
                    .min(cost[i][j - 1] + GAP_COST);    // extra word recited
            }
        }

        trace!("Sequence alignment cost {} for {} x {} words", cost[m][n], m, n);

        let mut out = Vec::with_capacity(m);
        let (mut i, mut j) = (m, n);
        while i > 0 {
            if j > 0 && cost[i][j] == cost[i - 1][j - 1] + pair[i - 1][j - 1] {
                out.push(DiffEntry {
                    word: reference[i - 1].clone(),
                    ok: pair[i - 1][j - 1] <= NEAR_COST,
                });
                i -= 1;
                j -= 1;
            } else if cost[i][j] == cost[i - 1][j] + GAP_COST {
                out.push(DiffEntry { word: reference[i - 1].clone(), ok: false });
                i -= 1;
            } else {
                j -= 1;
            }
        }

        out.reverse();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    fn flags(diff: &[DiffEntry]) -> Vec<bool> {
        diff.iter().map(|entry| entry.ok).collect()
    }

    #[test]
    fn test_positional_truncated_hypothesis() {
        let diff = diff_align(&words("بسم الله الرحمن"), &words("بسم الله"));
        assert_eq!(flags(&diff), vec![true, true, false]);
        assert_eq!(diff[2].word, "الرحمن");
    }

    #[test]
    fn test_positional_ignores_extra_words() {
        let diff = diff_align(&words("بسم الله"), &words("بسم الله الرحمن الرحيم"));
        assert_eq!(flags(&diff), vec![true, true]);
    }

    #[test]
    fn test_positional_edit_tolerance() {
        assert!(diff_align(&words("كتاب"), &words("كتب"))[0].ok);
        assert!(!diff_align(&words("كتاب"), &words("كتبوا"))[0].ok);
    }

    #[test]
    fn test_positional_cascades_after_dropped_word() {
        let diff = diff_align(&words("بسم الله الرحمن الرحيم"), &words("بسم الرحمن الرحيم"));
        assert_eq!(flags(&diff), vec![true, false, false, false]);
    }

    #[test]
    fn test_words_come_from_reference() {
        let diff = diff_align(&words("كتاب قلم"), &words("كتب قلم"));
        assert_eq!(diff[0].word, "كتاب");
    }

    #[test]
    fn test_sequence_recovers_from_dropped_word() {
        let aligner = SequenceAligner::default();
        let diff = aligner.align(&words("بسم الله الرحمن الرحيم"), &words("بسم الرحمن الرحيم"));
        assert_eq!(flags(&diff), vec![true, false, true, true]);
    }

    #[test]
    fn test_sequence_skips_inserted_word() {
        let aligner = SequenceAligner::default();
        let diff = aligner.align(&words("بسم الله الرحمن"), &words("بسم والله الله الرحمن"));
        assert_eq!(diff.len(), 3);
        assert!(flags(&diff).iter().all(|&ok| ok));
    }

    #[test]
    fn test_sequence_one_entry_per_reference_word() {
        let aligner = SequenceAligner::default();
        let reference = words("قل هو الله احد");
        for hypothesis in ["", "قل", "احد الله هو قل", "قل هو الله احد الله الصمد", "xyz"] {
            let diff = aligner.align(&reference, &words(hypothesis));
            let aligned: Vec<&str> = diff.iter().map(|entry| entry.word.as_str()).collect();
            assert_eq!(aligned, vec!["قل", "هو", "الله", "احد"]);
        }
    }

    #[test]
    fn test_sequence_substitution_marks_word_wrong() {
        let aligner = SequenceAligner::default();
        let diff = aligner.align(&words("قل هو الله احد"), &words("قل هم الله احد"));
        // هو -> هم is a single substitution, within tolerance
        assert_eq!(flags(&diff), vec![true, true, true, true]);
        let strict = SequenceAligner::new(WordTolerance::fixed(0));
        let diff = strict.align(&words("قل هو الله احد"), &words("قل هم الله احد"));
        assert_eq!(flags(&diff), vec![true, false, true, true]);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(diff_align(&[], &[]).is_empty());
        assert!(SequenceAligner::default().align(&[], &words("بسم")).is_empty());
    }
}
