use anyhow::{Context, Result};
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use crate::config::EngineConfig;

/// Initialize terminal logging with the specified verbosity level
pub fn init_logging(verbose: bool) -> Result<()> {
    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    TermLogger::init(
        log_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .context("Failed to initialize logger")?;
    Ok(())
}

/// Initialize logging from the engine configuration
pub fn init_logging_from_config(config: &EngineConfig) -> Result<()> {
    init_logging(config.verbose)
}
