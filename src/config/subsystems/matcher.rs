// src/config/subsystems/matcher.rs

use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};
use crate::config::FromIni;

/// How reference and hypothesis words are paired before scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentStrategy {
    /// Index-by-index comparison, no resynchronisation.
    Positional,
    /// Needleman-Wunsch over words; recovers from dropped or inserted words.
    Sequence,
}

impl AlignmentStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlignmentStrategy::Positional => "positional",
            AlignmentStrategy::Sequence => "sequence",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim_matches('"').to_lowercase().as_str() {
            "positional" => Some(Self::Positional),
            "sequence" => Some(Self::Sequence),
            _ => None,
        }
    }
}

impl Default for AlignmentStrategy {
    fn default() -> Self {
        Self::Positional
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
    // Word tolerance: a word is accepted when its edit distance is at most
    // max(max_word_distance, floor(relative_word_distance * word_len))
    pub max_word_distance: usize,
    pub relative_word_distance: f64,

    pub alignment: AlignmentStrategy,

    // Tokenized reference cache; sized to hold every verse of the longest
    // surah (286) so locating within it never evicts its own entries
    pub reference_cache_size: usize,
    pub reference_cache_ttl_secs: u64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            max_word_distance: 1,
            relative_word_distance: 0.0,
            alignment: AlignmentStrategy::Positional,
            reference_cache_size: 512,
            reference_cache_ttl_secs: 60 * 60,
        }
    }
}

impl FromIni for MatcherConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "matcher" {
            return None;
        }

        match key {
            "max_word_distance" => {
                match value.parse() {
                    Ok(dist) => {
                        self.max_word_distance = dist;
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid max_word_distance: {}", value)
                    ))),
                }
            },
            "relative_word_distance" => {
                match value.parse::<f64>() {
                    Ok(ratio) if (0.0..=1.0).contains(&ratio) => {
                        self.relative_word_distance = ratio;
                        Some(Ok(()))
                    },
                    _ => Some(Err(Error::Config(
                        format!("Invalid relative_word_distance (must be between 0 and 1): {}", value)
                    ))),
                }
            },
            "alignment" => {
                self.alignment = match AlignmentStrategy::from_str(value) {
                    Some(strategy) => strategy,
                    None => return Some(Err(Error::Config(
                        format!("Invalid alignment strategy: {}", value)
                    ))),
                };
                Some(Ok(()))
            },
            "reference_cache_size" => {
                match value.parse() {
                    Ok(size) if size > 0 => {
                        self.reference_cache_size = size;
                        Some(Ok(()))
                    },
                    _ => Some(Err(Error::Config(
                        format!("Invalid reference_cache_size (must be > 0): {}", value)
                    ))),
                }
            },
            "reference_cache_ttl_secs" => {
                match value.parse() {
                    Ok(ttl) => {
                        self.reference_cache_ttl_secs = ttl;
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid reference_cache_ttl_secs: {}", value)
                    ))),
                }
            },
            _ => None,
        }
    }
}

impl MatcherConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.relative_word_distance) {
            return Err(Error::Config(
                "relative_word_distance must be between 0 and 1".to_string()
            ));
        }
        if self.reference_cache_size == 0 {
            return Err(Error::Config(
                "reference_cache_size must be greater than 0".to_string()
            ));
        }
        Ok(())
    }

    pub fn describe(&self) -> String {
        if self.relative_word_distance > 0.0 {
            format!("{} alignment, word tolerance max({}, {:.2} x length)",
                self.alignment.as_str(), self.max_word_distance, self.relative_word_distance)
        } else {
            format!("{} alignment, word tolerance {}", self.alignment.as_str(), self.max_word_distance)
        }
    }
}
