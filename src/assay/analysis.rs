//! src/assay/analysis.rs
//!
//! Ties the pipeline together for each panel:
//! wide table → long observations → bar summaries → rank-sum tests → geometry.

use color_eyre::{Result, eyre::WrapErr};
use tracing::info;

use super::data::{PanelSpec, lick_table, panel_specs};
use super::plot::{self, PanelGeometry};
use super::reshape::{Observation, WideTable, long_format};
use super::stats::{OdorTest, test_odors};
use super::summary::{GroupSummary, summarize};
use crate::config::AppConfig;

/// Everything one chart needs, computed once and redrawn every frame.
#[derive(Clone, Debug)]
pub struct PanelAnalysis {
    pub spec: PanelSpec,
    pub observations: Vec<Observation>,
    pub summaries: Vec<GroupSummary>,
    pub tests: Vec<OdorTest>,
    pub geometry: PanelGeometry,
    /// Seed behind the current strip-point jitter.
    pub seed: u64,
}

impl PanelAnalysis {
    pub fn build(table: &WideTable, spec: PanelSpec, cfg: &AppConfig, seed: u64) -> Result<Self> {
        let observations = long_format(table, &spec.columns)
            .wrap_err_with(|| format!("reshaping panel {:?}", spec.title))?;
        let summaries = summarize(&observations, &spec.order)?;
        let tests = test_odors(&observations, &spec.order, &cfg.stats.thresholds)?;
        let geometry = plot::build(
            &observations,
            &summaries,
            &tests,
            &spec.order,
            &cfg.plot,
            seed,
        );
        for t in &tests {
            info!(
                panel = spec.title,
                odor = %t.odor,
                z = t.result.statistic,
                p = t.result.pvalue,
                stars = t.stars,
                "pre vs post"
            );
        }
        Ok(Self {
            spec,
            observations,
            summaries,
            tests,
            geometry,
            seed,
        })
    }

    /// Redraw strip-point jitter from a new seed; bars and tests are unchanged.
    pub fn rejitter(&mut self, cfg: &AppConfig, seed: u64) {
        self.seed = seed;
        self.geometry = plot::build(
            &self.observations,
            &self.summaries,
            &self.tests,
            &self.spec.order,
            &cfg.plot,
            seed,
        );
    }
}

/// Both panels, jittered from `cfg.plot.seed` (panel `i` uses `seed + i`).
pub fn analyze(cfg: &AppConfig) -> Result<Vec<PanelAnalysis>> {
    let table = lick_table();
    panel_specs()
        .into_iter()
        .enumerate()
        .map(|(i, spec)| {
            PanelAnalysis::build(&table, spec, cfg, cfg.plot.seed.wrapping_add(i as u64))
        })
        .collect()
}
