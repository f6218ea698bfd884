//! src/logging.rs
//!
//! File-backed `tracing` subscriber. The terminal belongs to the UI, so log
//! lines never go to stdout or stderr.

use std::fs::OpenOptions;
use std::sync::Mutex;

use color_eyre::{
    Report, Result,
    eyre::{WrapErr, eyre},
};
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Start logging for a run. `--report` runs leave no log file behind; for the
/// terminal UI a log file that cannot be opened is handed back as a warning
/// and the run continues without logs.
pub fn start(cfg: &LogConfig, report: bool) -> Option<Report> {
    if report {
        return None;
    }
    init(cfg).err()
}

/// Install the global subscriber. `RUST_LOG` wins over `cfg.level`; an empty
/// `cfg.file` leaves logging off.
pub fn init(cfg: &LogConfig) -> Result<()> {
    if cfg.file.is_empty() {
        return Ok(());
    }
    let filter = match EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => EnvFilter::try_new(&cfg.level)
            .wrap_err_with(|| format!("invalid log level {:?}", cfg.level))?,
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&cfg.file)
        .wrap_err_with(|| format!("failed to open log file {}", cfg.file))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| eyre!("failed to install log subscriber: {e}"))
}
