pub mod subsystems;

use serde::{Serialize, Deserialize};
use std::path::Path;
use std::fs;
use crate::error::Result;
use log::{info, warn, trace};

pub trait FromIni {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TasmiConfig {
    // Subsystem configs
    pub parser: subsystems::ParserConfig,
    pub matcher: subsystems::MatcherConfig,
    pub processor: subsystems::ProcessorConfig,

    // Keys rejected while loading, kept until a logger exists to report them
    #[serde(skip)]
    pub warnings: Vec<String>,
}

impl TasmiConfig {
    pub fn validate(&self) -> Result<()> {
        self.parser.validate()?;
        self.matcher.validate()?;
        self.processor.validate()?;
        Ok(())
    }

    pub fn from_ini<P: AsRef<Path>>(path: P) -> Result<Self> {
        let absolute_path = std::fs::canonicalize(&path)
            .unwrap_or_else(|_| path.as_ref().to_path_buf());

        trace!("Loading configuration from: {:?}", absolute_path);

        let content = fs::read_to_string(&path)?;
        Self::from_ini_str(&content)
    }

    pub fn from_ini_str(content: &str) -> Result<Self> {
        let mut config = Self::default();
        let mut current_section = String::new();

        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                current_section = line[1..line.len()-1].trim().to_string();
                trace!("  Line {}: Found section: [{}]", line_num + 1, current_section);
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim();

                // Delegate to appropriate subsystem config
                if let Some(result) = match current_section.as_str() {
                    "text_processing" => config.parser.from_ini_section(&current_section, key, value),
                    "matcher" => config.matcher.from_ini_section(&current_section, key, value),
                    "processor" => config.processor.from_ini_section(&current_section, key, value),
                    _ => None,
                } {
                    if let Err(e) = result {
                        config.warnings.push(format!(
                            "Error processing config key {}={}: {}", key, value, e));
                    }
                } else {
                    config.warnings.push(format!(
                        "Unrecognized config key: {}={} in section [{}]", key, value, current_section));
                }
            }
        }

        config.validate()?;
        trace!("Configuration parsed with {} rejected keys", config.warnings.len());
        Ok(config)
    }

    /// Reports rejected keys and the effective settings. Call once logging is up.
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            warn!("{}", warning);
        }
        info!("Configuration loaded: {}; {}", self.parser.describe(), self.matcher.describe());
    }
}
