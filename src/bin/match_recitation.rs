use std::path::PathBuf;
use clap::Parser;
use log::{info, error};
use tasmi::{
    TasmiConfig,
    RecitationMatcher,
    SurahText,
    project_highlights,
    Error,
    Result,
};
use tasmi::matcher::{locate_verse, MatchResult};
use tasmi::utils::init_logging;

/// Compare a recitation transcript with the reference verse.
#[derive(Debug, Parser)]
#[command(name = "match_recitation", version)]
struct Args {
    /// Reference verse text
    #[arg(long, conflicts_with = "surah_file")]
    reference: Option<String>,

    /// Surah JSON in the alquran.cloud envelope format
    #[arg(long)]
    surah_file: Option<PathBuf>,

    /// Verse number within the surah file
    #[arg(long, requires = "surah_file")]
    ayah: Option<u16>,

    /// Transcript produced by speech recognition
    #[arg(long)]
    transcript: String,

    /// Rank every verse of the surah file instead of scoring one
    #[arg(long, requires = "surah_file", conflicts_with = "ayah")]
    locate: bool,

    /// INI configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use sequence alignment regardless of configuration
    #[arg(long)]
    realign: bool,

    /// Print JSON instead of a text report
    #[arg(long)]
    json: bool,
}

fn print_report(result: &MatchResult) {
    println!("Accuracy: {}%", result.accuracy);
    println!("Jaccard:  {:.1}%", result.jaccard * 100.0);
    for highlight in project_highlights(result) {
        println!("  {} {}", if highlight.ok { "+" } else { "-" }, highlight.word);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => TasmiConfig::from_ini(path)?,
        None => TasmiConfig::default(),
    };
    if args.realign {
        config.matcher.alignment = tasmi::config::subsystems::AlignmentStrategy::Sequence;
    }
    init_logging(&config.processor)?;
    config.log_warnings();

    let matcher = RecitationMatcher::new(&config);
    info!("Matching with {}", config.matcher.describe());

    if let Some(text) = &args.reference {
        let result = matcher.match_text(text, &args.transcript);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            print_report(&result);
        }
        return Ok(());
    }

    let path = args.surah_file.as_ref()
        .ok_or_else(|| Error::config("Either --reference or --surah-file is required"))?;
    let surah = SurahText::from_file(path)?;

    if args.locate {
        let ranked = locate_verse(&matcher, &surah, &args.transcript);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&ranked)?);
        } else {
            for score in ranked.iter().take(5) {
                println!("{}:{}  jaccard {:.1}%  accuracy {}%",
                    score.surah, score.ayah, score.result.jaccard * 100.0, score.result.accuracy);
            }
        }
        return Ok(());
    }

    let ayah = args.ayah
        .ok_or_else(|| Error::config("--ayah or --locate is required with --surah-file"))?;
    let verse = surah.verse(ayah)
        .ok_or_else(|| Error::reference(format!("Surah {} has no ayah {}", surah.number, ayah)))?;

    let result = matcher.match_text(&verse.text, &args.transcript);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{} {}:{}", surah.english_name, surah.number, verse.number);
        print_report(&result);
    }
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
