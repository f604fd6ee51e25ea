// src/config/subsystems/parser.rs

use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};
use crate::config::FromIni;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    // Text cleaning settings
    pub remove_diacritics: bool,
    pub remove_tatweel: bool,
    pub normalize_arabic: bool,
    /// Fold ta marbuta (ة) to ha (ه). Off by default.
    pub fold_ta_marbuta: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            remove_diacritics: true,
            remove_tatweel: true,
            normalize_arabic: true,
            fold_ta_marbuta: false,
        }
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    value.trim_matches('"').parse().map_err(|_| Error::Config(
        format!("Invalid {} value (must be true/false): {}", key, value)
    ))
}

impl FromIni for ParserConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "text_processing" {
            return None;
        }

        let target = match key {
            "remove_diacritics" => &mut self.remove_diacritics,
            "remove_tatweel" => &mut self.remove_tatweel,
            "normalize_arabic" => &mut self.normalize_arabic,
            "fold_ta_marbuta" => &mut self.fold_ta_marbuta,
            _ => return None,
        };

        Some(parse_flag(key, value).map(|flag| *target = flag))
    }
}

impl ParserConfig {
    pub fn validate(&self) -> Result<()> {
        // Boolean flags only
        Ok(())
    }

    /// Returns a description of the current text processing configuration
    pub fn describe(&self) -> String {
        let mut description = Vec::new();

        if self.remove_diacritics {
            description.push("removing diacritical marks");
        }
        if self.remove_tatweel {
            description.push("removing tatweel");
        }
        if self.normalize_arabic {
            description.push("folding letter variants");
        }
        if self.fold_ta_marbuta {
            description.push("folding ta marbuta");
        }
        description.push("removing punctuation");

        description.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_parsing() {
        let mut config = ParserConfig::default();
        assert!(config.from_ini_section("text_processing", "remove_diacritics", "false").unwrap().is_ok());
        assert!(!config.remove_diacritics);
        assert!(config.from_ini_section("text_processing", "remove_tatweel", "maybe").unwrap().is_err());
        assert!(config.remove_tatweel);
    }

    #[test]
    fn test_other_sections_ignored() {
        let mut config = ParserConfig::default();
        assert!(config.from_ini_section("matcher", "remove_diacritics", "false").is_none());
        assert!(config.from_ini_section("text_processing", "stop_words_file", "x.txt").is_none());
    }
}
