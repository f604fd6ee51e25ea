use std::fs::OpenOptions;
use std::io::Write;
use chrono::Local;
use env_logger::{Builder, Target};
use log::info;
use crate::config::subsystems::ProcessorConfig;
use crate::error::Result;

/// Installs the global logger: timestamped lines, level from config, written
/// to `log_file` when one is configured and to stderr otherwise.
pub fn init_logging(config: &ProcessorConfig) -> Result<()> {
    let mut builder = Builder::new();
    builder
        .format(|buf, record| {
            writeln!(buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, config.get_log_level());

    match &config.log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let log_file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            builder.target(Target::Pipe(Box::new(log_file)));
        }
        None => {
            builder.target(Target::Stderr);
        }
    }

    // A second init (tests, embedding) keeps the first logger
    if builder.try_init().is_ok() {
        info!("Logging initialised at level {:?}", config.get_log_level());
    }
    Ok(())
}
