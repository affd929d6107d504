//! Tracing setup for the portfolio backend.
//!
//! Console output is always on. When the config names a log file, the same
//! subscriber additionally mirrors every line into that file. `RUST_LOG`
//! directives layer on top of the configured base level either way.

use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::Result;

/// Resolve a config string into a level, defaulting to INFO.
fn level_from_config(level: &str) -> Level {
    // "warning" is a common config spelling tracing does not accept
    if level.eq_ignore_ascii_case("warning") {
        return Level::WARN;
    }
    level.parse().unwrap_or(Level::INFO)
}

fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::from_default_env().add_directive(level.into())
}

/// Install the global subscriber from the logging config.
///
/// An empty `file` path means console-only output.
pub fn init(config: &LoggingConfig) -> Result<()> {
    if config.file.is_empty() {
        init_console_only(&config.level);
        return Ok(());
    }

    let filter = env_filter(level_from_config(&config.level));

    if let Some(parent) = Path::new(&config.file).parent() {
        fs::create_dir_all(parent)?;
    }
    let log_file = Arc::new(File::create(&config.file)?);

    // One fmt layer feeding both sinks keeps console and file in lockstep,
    // so ANSI colors stay off
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout.and(log_file))
                .with_ansi(false)
                .with_target(true),
        )
        .with(filter)
        .init();

    Ok(())
}

/// Console-only subscriber, also the fallback when the configured log file
/// cannot be created.
pub fn init_console_only(level: &str) {
    let filter = env_filter(level_from_config(level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_ansi(true)
                .with_target(true),
        )
        .with(filter)
        .init();
}
