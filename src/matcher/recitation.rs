use std::sync::Arc;
use std::time::Duration;
use log::debug;

use crate::cache::{Clock, SystemClock, TtlCache};
use crate::config::TasmiConfig;
use crate::config::subsystems::AlignmentStrategy;
use crate::parser::{ArabicNormalizer, TextNormalizer, tokenize};
use super::algorithms::{accuracy, jaccard_similarity, WordTolerance};
use super::alignment::{aligner_for, PositionalAligner, WordAligner};
use super::types::{Highlight, MatchResult};

/// Scores recitation transcripts against reference verses.
///
/// Tokenized references are kept in a TTL cache so that repeated interim
/// transcripts for the same verse do not re-normalize it.
pub struct RecitationMatcher<C: Clock = SystemClock> {
    normalizer: ArabicNormalizer,
    aligner: Box<dyn WordAligner>,
    reference_cache: TtlCache<String, Arc<Vec<String>>, C>,
}

impl RecitationMatcher<SystemClock> {
    pub fn new(config: &TasmiConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl Default for RecitationMatcher<SystemClock> {
    fn default() -> Self {
        Self::new(&TasmiConfig::default())
    }
}

impl<C: Clock> RecitationMatcher<C> {
    pub fn with_clock(config: &TasmiConfig, clock: C) -> Self {
        let tolerance = WordTolerance::from_config(&config.matcher);
        debug!("Creating recitation matcher: {}", config.matcher.describe());

        Self {
            normalizer: ArabicNormalizer::new(config.parser.clone()),
            aligner: aligner_for(config.matcher.alignment, tolerance),
            reference_cache: TtlCache::with_clock(
                config.matcher.reference_cache_size,
                Duration::from_secs(config.matcher.reference_cache_ttl_secs),
                clock,
            ),
        }
    }

    pub fn strategy(&self) -> AlignmentStrategy {
        self.aligner.strategy()
    }

    pub fn reference_cache(&self) -> &TtlCache<String, Arc<Vec<String>>, C> {
        &self.reference_cache
    }

    fn reference_tokens(&self, reference_text: &str) -> Arc<Vec<String>> {
        if let Some(tokens) = self.reference_cache.get(reference_text) {
            return tokens;
        }
        let tokens = Arc::new(self.normalizer.tokenize(reference_text));
        self.reference_cache.insert(reference_text.to_string(), Arc::clone(&tokens));
        tokens
    }

    /// Results for the same cached reference share one token list.
    pub fn match_text(&self, reference_text: &str, hypothesis_text: &str) -> MatchResult {
        let ref_tokens = self.reference_tokens(reference_text);
        let hyp_tokens = self.normalizer.tokenize(hypothesis_text);
        score_tokens(ref_tokens, hyp_tokens, &*self.aligner)
    }
}

fn score_tokens(ref_tokens: Arc<Vec<String>>, hyp_tokens: Vec<String>, aligner: &dyn WordAligner) -> MatchResult {
    let jaccard = jaccard_similarity(ref_tokens.as_slice(), &hyp_tokens);
    let diff = aligner.align(ref_tokens.as_slice(), &hyp_tokens);
    let accuracy = accuracy(&diff);

    MatchResult {
        jaccard,
        accuracy,
        diff,
        ref_tokens,
        hyp_tokens,
    }
}

/// Compares a transcript with a reference verse using the default settings:
/// positional alignment and a one-edit word tolerance.
pub fn match_text(reference_text: &str, hypothesis_text: &str) -> MatchResult {
    score_tokens(Arc::new(tokenize(reference_text)), tokenize(hypothesis_text), &PositionalAligner::default())
}

pub fn project_highlights(result: &MatchResult) -> Vec<Highlight<'_>> {
    result.diff.iter()
        .map(|entry| Highlight { word: &entry.word, ok: entry.ok })
        .collect()
}
