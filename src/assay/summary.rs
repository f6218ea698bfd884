//! src/assay/summary.rs
//!
//! Per-cell (odor × test) bar heights and error-bar half widths.

use color_eyre::{Result, eyre::bail};

use super::data::Test;
use super::reshape::Observation;

/// Mean and spread of one bar.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupSummary {
    pub odor: String,
    pub test: Test,
    pub n: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator).
    pub sd: f64,
}

/// Licks for one odor/test cell, in input order.
pub fn values_for(observations: &[Observation], odor: &str, test: Test) -> Vec<f64> {
    observations
        .iter()
        .filter(|o| o.odor == odor && o.test == test)
        .map(|o| o.licks)
        .collect()
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation; 0 for fewer than two values.
pub fn sample_sd(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

/// One summary per bar, odor-major in `order`, hue-minor in `Test::HUE_ORDER`.
pub fn summarize(observations: &[Observation], order: &[&str]) -> Result<Vec<GroupSummary>> {
    let mut out = Vec::with_capacity(order.len() * Test::HUE_ORDER.len());
    for &odor in order {
        for test in Test::HUE_ORDER {
            let values = values_for(observations, odor, test);
            if values.is_empty() {
                bail!("no {} observations for {odor}", test.label());
            }
            out.push(GroupSummary {
                odor: odor.to_string(),
                test,
                n: values.len(),
                mean: mean(&values),
                sd: sample_sd(&values),
            });
        }
    }
    Ok(out)
}
