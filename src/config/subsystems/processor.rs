// src/config/subsystems/processor.rs

use serde::{Serialize, Deserialize};
use std::path::PathBuf;
use log::LevelFilter;
use crate::error::{Error, Result};
use crate::config::FromIni;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorConfig {
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    // 0 leaves the rayon default in place
    pub threads: usize,
    pub show_progress: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file: None,
            threads: 0,
            show_progress: true,
        }
    }
}

fn parse_level(value: &str) -> Option<LevelFilter> {
    match value.trim_matches('"').to_lowercase().as_str() {
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        "none" | "off" => Some(LevelFilter::Off),
        _ => None,
    }
}

impl FromIni for ProcessorConfig {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        if section_name != "processor" {
            return None;
        }

        match key {
            "log_level" => {
                if parse_level(value).is_none() {
                    return Some(Err(Error::Config(
                        format!("Invalid log_level: {}", value)
                    )));
                }
                self.log_level = value.trim_matches('"').to_lowercase();
                Some(Ok(()))
            },
            "log_file" => {
                let path = value.trim_matches('"');
                self.log_file = if path.is_empty() { None } else { Some(PathBuf::from(path)) };
                Some(Ok(()))
            },
            "threads" => {
                match value.parse() {
                    Ok(threads) => {
                        self.threads = threads;
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid threads: {}", value)
                    ))),
                }
            },
            "show_progress" => {
                match value.parse() {
                    Ok(flag) => {
                        self.show_progress = flag;
                        Some(Ok(()))
                    },
                    Err(_) => Some(Err(Error::Config(
                        format!("Invalid show_progress value (must be true/false): {}", value)
                    ))),
                }
            },
            _ => None,
        }
    }
}

impl ProcessorConfig {
    pub fn validate(&self) -> Result<()> {
        if parse_level(&self.log_level).is_none() {
            return Err(Error::Config(format!("Invalid log_level: {}", self.log_level)));
        }
        Ok(())
    }

    pub fn get_log_level(&self) -> LevelFilter {
        parse_level(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    /// Builds the rayon pool used for batch scoring.
    pub fn build_thread_pool(&self) -> Result<rayon::ThreadPool> {
        let mut builder = rayon::ThreadPoolBuilder::new();
        if self.threads > 0 {
            builder = builder.num_threads(self.threads);
        }
        Ok(builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level() {
        let mut config = ProcessorConfig::default();
        assert_eq!(config.get_log_level(), LevelFilter::Info);
        assert!(config.from_ini_section("processor", "log_level", "TRACE").unwrap().is_ok());
        assert_eq!(config.get_log_level(), LevelFilter::Trace);
        assert!(config.from_ini_section("processor", "log_level", "loud").unwrap().is_err());
        assert_eq!(config.log_level, "trace");
    }

    #[test]
    fn test_thread_pool_size() {
        let config = ProcessorConfig { threads: 2, ..ProcessorConfig::default() };
        let pool = config.build_thread_pool().unwrap();
        assert_eq!(pool.current_num_threads(), 2);
    }
}
