use std::path::PathBuf;
use std::time::Instant;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, error};
use tasmi::{TasmiConfig, RecitationMatcher, SurahText, Error, Result};
use tasmi::matcher::score_attempts;
use tasmi::report::{load_attempts, write_report};
use tasmi::utils::init_logging;

/// Score a session of recorded recitation attempts and write a CSV report.
#[derive(Debug, Parser)]
#[command(name = "score_session", version)]
struct Args {
    /// Surah JSON in the alquran.cloud envelope format
    #[arg(long)]
    surah_file: PathBuf,

    /// JSON lines, one {"ayah": n, "transcript": "..."} per line
    #[arg(long)]
    attempts: PathBuf,

    /// CSV report destination
    #[arg(long, default_value = "session_report.csv")]
    output: PathBuf,

    /// INI configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => TasmiConfig::from_ini(path)?,
        None => TasmiConfig::default(),
    };
    init_logging(&config.processor)?;
    config.log_warnings();

    let start = Instant::now();
    let surah = SurahText::from_file(&args.surah_file)?;
    let attempts = load_attempts(&args.attempts)?;
    if attempts.is_empty() {
        return Err(Error::config(format!("No attempts found in {:?}", args.attempts)));
    }

    let matcher = RecitationMatcher::new(&config);
    let pool = config.processor.build_thread_pool()?;

    let progress = if config.processor.show_progress {
        let bar = ProgressBar::new(attempts.len() as u64);
        bar.set_style(ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} attempts")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"));
        bar
    } else {
        ProgressBar::hidden()
    };

    let scores = pool.install(|| {
        score_attempts(&matcher, &surah, &attempts, || progress.inc(1))
    });
    progress.finish_with_message("done");

    write_report(&args.output, &scores)?;

    let scored: Vec<u32> = scores.iter()
        .filter_map(|score| score.result.as_ref().map(|result| result.accuracy))
        .collect();
    let mean = if scored.is_empty() {
        0.0
    } else {
        scored.iter().sum::<u32>() as f64 / scored.len() as f64
    };

    info!("Scored {} of {} attempts in {:?}, mean accuracy {:.1}%",
        scored.len(), attempts.len(), start.elapsed(), mean);
    println!("Mean accuracy {:.1}% over {} attempts; report written to {:?}",
        mean, scored.len(), args.output);
    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
