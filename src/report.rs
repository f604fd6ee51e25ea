//! Session files: recorded attempts in, per-attempt CSV report out.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use log::{debug, warn};

use crate::error::Result;
use crate::matcher::{Attempt, AttemptScore};

pub const REPORT_HEADER: [&str; 6] = ["ayah", "accuracy", "jaccard", "words", "missed", "error"];

/// Reads JSON lines of `{"ayah": n, "transcript": "..."}`. Blank lines are
/// ignored and malformed lines are skipped with a warning.
pub fn load_attempts(path: &Path) -> Result<Vec<Attempt>> {
    let reader = BufReader::new(File::open(path)?);
    let mut attempts = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_str::<Attempt>(trimmed) {
            Ok(attempt) => attempts.push(attempt),
            Err(e) => warn!("Skipping line {} of {:?}: {}", line_num + 1, path, e),
        }
    }

    debug!("Loaded {} attempts from {:?}", attempts.len(), path);
    Ok(attempts)
}

/// Writes one row per attempt. Failed attempts leave the score columns
/// empty and carry their message in `error`.
pub fn write_report(path: &Path, scores: &[AttemptScore]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(REPORT_HEADER)?;

    for score in scores {
        let row = match &score.result {
            Some(result) => [
                score.ayah.to_string(),
                result.accuracy.to_string(),
                format!("{:.4}", result.jaccard),
                result.diff.len().to_string(),
                result.missed_words().collect::<Vec<_>>().join(" "),
                String::new(),
            ],
            None => [
                score.ayah.to_string(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                score.error.clone().unwrap_or_default(),
            ],
        };
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}
