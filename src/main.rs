//! src/main.rs
//!
//! Entrypoint: parse arguments, load config, start logging, then delegate to `app::run()`.

mod app;
mod assay;
mod cli;
mod config;
mod logging;
mod panels;
mod report;
mod ui;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use tracing::warn;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = cli::Args::parse();

    // config errors are logged once the subscriber exists; the run continues on defaults
    let (config, config_err) = config::AppConfig::resolve(&args);

    if args.dump_config {
        if let Some(err) = &config_err {
            eprintln!("warning: {err:#}. Using defaults.");
        }
        let text = toml::to_string_pretty(&config).wrap_err("failed to serialize config")?;
        print!("{text}");
        return Ok(());
    }

    if let Some(err) = logging::start(&config.log, args.report) {
        eprintln!("warning: {err:#}. Logging disabled.");
    }
    if let Some(err) = config_err {
        warn!("{err:#}. Using defaults.");
        if args.report {
            eprintln!("warning: {err:#}. Using defaults.");
        }
    }

    app::run(&args, &config)
}
