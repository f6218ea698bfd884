//! src/cli.rs
//!
//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Pre/Post odor lick assay: bar + strip charts with rank-sum tests")]
pub struct Args {
    /// Path to config TOML
    #[arg(long, default_value = "odor-licks.toml")]
    pub config: PathBuf,

    /// Print the summary table to stdout instead of opening the terminal UI
    #[arg(long, default_value_t = false)]
    pub report: bool,

    /// Jitter seed for strip points (overrides config)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the effective configuration as TOML and exit
    #[arg(long, default_value_t = false)]
    pub dump_config: bool,
}
