//! Process setup shared by both binaries

use color_eyre::{eyre::eyre, Result};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Installs the eyre report handler. Call once, before anything can fail.
pub fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    Ok(())
}

/// Parses a level name such as `"debug"` or `"WARN"`
pub fn parse_level(level: &str) -> Result<Level> {
    level
        .trim()
        .parse::<Level>()
        .map_err(|e| eyre!("Invalid log level '{}': {}", level, e))
}

pub fn setup_logging(level: &str) -> Result<()> {
    let level = parse_level(level)?;
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
    Ok(())
}
