//! src/config.rs
//!
//! TOML configuration for chart styling, significance cut-offs, frame pacing
//! and logging. Every field has a default, so an empty or partial file is valid.
//!
//! ```toml
//! [plot]
//! bar_width = 0.8
//! capsize = 0.1
//! jitter = 0.05
//! seed = 7
//! bar_alpha = 0.5
//! show_error_bars = true
//! show_strip = true
//!
//! [stats]
//! thresholds = [0.001, 0.01, 0.05]
//!
//! [ui]
//! frame_ms = 100
//!
//! [log]
//! file = "odor-licks.log"
//! level = "info"
//! ```

use std::fs;
use std::path::Path;

use color_eyre::{
    Report, Result,
    eyre::{WrapErr, bail},
};
use serde::{Deserialize, Serialize};

use crate::assay::stats::DEFAULT_THRESHOLDS;
use crate::cli::Args;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Width of one odor category, shared by its Pre and Post bars.
    #[serde(default = "PlotConfig::default_bar_width")]
    pub bar_width: f64,
    /// Error-bar cap width in category units.
    #[serde(default = "PlotConfig::default_capsize")]
    pub capsize: f64,
    /// Half-width of the uniform horizontal jitter applied to strip points.
    #[serde(default = "PlotConfig::default_jitter")]
    pub jitter: f64,
    #[serde(default = "PlotConfig::default_seed")]
    pub seed: u64,
    /// Bar fill opacity over the terminal background.
    #[serde(default = "PlotConfig::default_bar_alpha")]
    pub bar_alpha: f64,
    #[serde(default = "PlotConfig::default_true")]
    pub show_error_bars: bool,
    #[serde(default = "PlotConfig::default_true")]
    pub show_strip: bool,
}

impl PlotConfig {
    fn default_bar_width() -> f64 {
        0.8
    }
    fn default_capsize() -> f64 {
        0.1
    }
    fn default_jitter() -> f64 {
        0.05
    }
    fn default_seed() -> u64 {
        7
    }
    fn default_bar_alpha() -> f64 {
        0.5
    }
    fn default_true() -> bool {
        true
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            bar_width: Self::default_bar_width(),
            capsize: Self::default_capsize(),
            jitter: Self::default_jitter(),
            seed: Self::default_seed(),
            bar_alpha: Self::default_bar_alpha(),
            show_error_bars: true,
            show_strip: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Ascending p-value cut-offs for `***`, `**` and `*`.
    #[serde(default = "StatsConfig::default_thresholds")]
    pub thresholds: [f64; 3],
}

impl StatsConfig {
    fn default_thresholds() -> [f64; 3] {
        DEFAULT_THRESHOLDS
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            thresholds: Self::default_thresholds(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "UiConfig::default_frame_ms")]
    pub frame_ms: u64,
}

impl UiConfig {
    fn default_frame_ms() -> u64 {
        100
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            frame_ms: Self::default_frame_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log file path; empty disables logging.
    #[serde(default = "LogConfig::default_file")]
    pub file: String,
    /// `EnvFilter` directive, overridden by `RUST_LOG`.
    #[serde(default = "LogConfig::default_level")]
    pub level: String,
}

impl LogConfig {
    fn default_file() -> String {
        "odor-licks.log".to_string()
    }
    fn default_level() -> String {
        "info".to_string()
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: Self::default_file(),
            level: Self::default_level(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub plot: PlotConfig,
    #[serde(default)]
    pub stats: StatsConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// Load `path`, falling back to defaults when the file does not exist.
    ///
    /// A file that exists but cannot be read, parsed or validated is an error;
    /// the caller decides whether to continue with defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
        let cfg = Self::from_toml(&text)
            .wrap_err_with(|| format!("failed to load config {}", path.display()))?;
        Ok(cfg)
    }

    /// Effective configuration for a run: `args.config` loaded, or defaults when
    /// it is unusable (the error is handed back for the caller to report), with
    /// `--seed` applied on top.
    pub fn resolve(args: &Args) -> (Self, Option<Report>) {
        let (mut cfg, err) = match Self::load(&args.config) {
            Ok(cfg) => (cfg, None),
            Err(err) => (Self::default(), Some(err)),
        };
        if let Some(seed) = args.seed {
            cfg.plot.seed = seed;
        }
        (cfg, err)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(text).wrap_err("malformed TOML")?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        let p = &self.plot;
        if !(p.bar_width > 0.0 && p.bar_width <= 1.0) {
            bail!("plot.bar_width must be in (0, 1], got {}", p.bar_width);
        }
        if !(p.capsize >= 0.0 && p.capsize <= p.bar_width) {
            bail!("plot.capsize must be in [0, bar_width], got {}", p.capsize);
        }
        if !(p.jitter >= 0.0 && p.jitter <= p.bar_width / 4.0) {
            bail!(
                "plot.jitter must be in [0, bar_width / 4], got {}",
                p.jitter
            );
        }
        if !(0.0..=1.0).contains(&p.bar_alpha) {
            bail!("plot.bar_alpha must be in [0, 1], got {}", p.bar_alpha);
        }
        let t = self.stats.thresholds;
        if !(0.0 < t[0] && t[0] < t[1] && t[1] < t[2] && t[2] <= 1.0) {
            bail!("stats.thresholds must be ascending within (0, 1], got {t:?}");
        }
        if self.ui.frame_ms == 0 {
            bail!("ui.frame_ms must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg.plot.bar_width, 0.8);
        assert_eq!(cfg.stats.thresholds, DEFAULT_THRESHOLDS);
        assert_eq!(cfg.ui.frame_ms, 100);
        assert_eq!(cfg.log.level, "info");
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let cfg = AppConfig::from_toml("[plot]\nseed = 42\nshow_strip = false\n").unwrap();
        assert_eq!(cfg.plot.seed, 42);
        assert!(!cfg.plot.show_strip);
        assert!(cfg.plot.show_error_bars);
        assert_eq!(cfg.plot.jitter, 0.05);
    }

    #[test]
    fn rejects_unordered_thresholds() {
        let err = AppConfig::from_toml("[stats]\nthresholds = [0.05, 0.01, 0.001]\n").unwrap_err();
        assert!(format!("{err:#}").contains("thresholds"));
    }

    #[test]
    fn rejects_out_of_range_plot_values() {
        assert!(AppConfig::from_toml("[plot]\nbar_width = 1.5\n").is_err());
        assert!(AppConfig::from_toml("[plot]\njitter = 0.5\n").is_err());
        assert!(AppConfig::from_toml("[plot]\nbar_alpha = -0.1\n").is_err());
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(AppConfig::from_toml("[plot\n").is_err());
    }

    #[test]
    fn missing_file_is_default() {
        let cfg = AppConfig::load(Path::new("/nonexistent/odor-licks.toml")).unwrap();
        assert_eq!(cfg.plot.seed, 7);
    }

    #[test]
    fn defaults_survive_serialization() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let back = AppConfig::from_toml(&text).unwrap();
        assert_eq!(back.plot.capsize, 0.1);
        assert_eq!(back.log.file, "odor-licks.log");
    }

    fn scratch_config(name: &str, text: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "odor-licks-{}-{name}.toml",
            std::process::id()
        ));
        fs::write(&path, text).unwrap();
        path
    }

    fn args_for(path: &Path, extra: &[&str]) -> Args {
        use clap::Parser;
        let mut argv = vec!["odor_licks", "--config", path.to_str().unwrap()];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let path = scratch_config("malformed", "[plot
seed = 42
");
        let (cfg, err) = AppConfig::resolve(&args_for(&path, &[]));
        fs::remove_file(&path).ok();
        assert_eq!(cfg.plot.seed, 7);
        assert_eq!(cfg.plot.bar_width, 0.8);
        let err = err.expect("malformed config must be reported");
        assert!(format!("{err:#}").contains("failed to load config"));
    }

    #[test]
    fn invalid_values_fall_back_but_seed_flag_still_applies() {
        let path = scratch_config("invalid", "[plot]
bar_width = 3.0
");
        let (cfg, err) = AppConfig::resolve(&args_for(&path, &["--seed", "5"]));
        fs::remove_file(&path).ok();
        assert!(err.is_some());
        assert_eq!(cfg.plot.bar_width, 0.8);
        assert_eq!(cfg.plot.seed, 5);
    }

    #[test]
    fn seed_flag_overrides_file() {
        let path = scratch_config("seed", "[plot]
seed = 42
jitter = 0.1
");
        let (from_file, err) = AppConfig::resolve(&args_for(&path, &[]));
        assert!(err.is_none());
        assert_eq!(from_file.plot.seed, 42);

        let (cfg, err) = AppConfig::resolve(&args_for(&path, &["--seed", "99"]));
        fs::remove_file(&path).ok();
        assert!(err.is_none());
        assert_eq!(cfg.plot.seed, 99);
        assert_eq!(cfg.plot.jitter, 0.1);
    }

    #[test]
    fn missing_file_resolves_quietly() {
        let args = args_for(Path::new("/nonexistent/odor-licks.toml"), &[]);
        let (cfg, err) = AppConfig::resolve(&args);
        assert!(err.is_none());
        assert_eq!(cfg.plot.seed, 7);
    }
}
