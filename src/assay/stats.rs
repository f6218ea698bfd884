//! src/assay/stats.rs
//!
//! Wilcoxon rank-sum test (large-sample normal approximation) and the
//! star notation used to annotate the charts.
//!
//! The statistic is the z-score of the rank sum of the first sample:
//!
//! ```text
//! s = Σ rank(x_i)              ranks taken over x ∪ y, ties averaged
//! z = (s - n1(n1+n2+1)/2) / sqrt(n1 n2 (n1+n2+1) / 12)
//! p = 2 (1 - Φ(|z|))
//! ```
//!
//! No tie or continuity correction is applied.

use color_eyre::{
    Result,
    eyre::{WrapErr, bail, eyre},
};
use statrs::distribution::{ContinuousCDF, Normal};
use tracing::debug;

use super::data::Test;
use super::reshape::Observation;
use super::summary::values_for;

/// Default p-value cut-offs for `***`, `**`, `*`.
pub const DEFAULT_THRESHOLDS: [f64; 3] = [0.001, 0.01, 0.05];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RankSumResult {
    /// z-score of the first sample's rank sum.
    pub statistic: f64,
    /// Two-sided p-value.
    pub pvalue: f64,
}

/// Pre vs Post outcome for one odor.
#[derive(Clone, Debug, PartialEq)]
pub struct OdorTest {
    pub odor: String,
    pub result: RankSumResult,
    pub stars: &'static str,
}

/// 1-based ranks; tied values share the mean of the ranks they span.
pub fn rank_data(values: &[f64]) -> Vec<f64> {
    let mut idx: Vec<usize> = (0..values.len()).collect();
    idx.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < idx.len() {
        let mut end = start + 1;
        while end < idx.len() && values[idx[end]] == values[idx[start]] {
            end += 1;
        }
        // positions start..end hold ranks start+1 ..= end
        let avg = (start + 1 + end) as f64 / 2.0;
        for &i in &idx[start..end] {
            ranks[i] = avg;
        }
        start = end;
    }
    ranks
}

/// Rank-sum test of `x` against `y`.
pub fn rank_sum(x: &[f64], y: &[f64]) -> Result<RankSumResult> {
    if x.is_empty() || y.is_empty() {
        bail!(
            "rank-sum needs two non-empty samples (got {} and {})",
            x.len(),
            y.len()
        );
    }
    let n1 = x.len() as f64;
    let n2 = y.len() as f64;

    let pooled: Vec<f64> = x.iter().chain(y.iter()).copied().collect();
    let ranks = rank_data(&pooled);
    let s: f64 = ranks[..x.len()].iter().sum();

    let expected = n1 * (n1 + n2 + 1.0) / 2.0;
    let z = (s - expected) / (n1 * n2 * (n1 + n2 + 1.0) / 12.0).sqrt();

    let normal =
        Normal::new(0.0, 1.0).map_err(|e| eyre!("invalid standard normal parameters: {e}"))?;
    let pvalue = 2.0 * normal.sf(z.abs());

    Ok(RankSumResult {
        statistic: z,
        pvalue,
    })
}

/// Stars for a p-value given ascending cut-offs `[***, **, *]`.
pub fn significance(p: f64, thresholds: &[f64; 3]) -> &'static str {
    if p < thresholds[0] {
        "***"
    } else if p < thresholds[1] {
        "**"
    } else if p < thresholds[2] {
        "*"
    } else {
        ""
    }
}

/// Pre (x) against Post (y) for every odor in `order`.
pub fn test_odors(
    observations: &[Observation],
    order: &[&str],
    thresholds: &[f64; 3],
) -> Result<Vec<OdorTest>> {
    order
        .iter()
        .map(|&odor| -> Result<OdorTest> {
            let pre = values_for(observations, odor, Test::Pre);
            let post = values_for(observations, odor, Test::Post);
            let result =
                rank_sum(&pre, &post).wrap_err_with(|| format!("rank-sum for {odor}"))?;
            let stars = significance(result.pvalue, thresholds);
            debug!(
                odor,
                z = result.statistic,
                p = result.pvalue,
                stars,
                "rank-sum"
            );
            Ok(OdorTest {
                odor: odor.to_string(),
                result,
                stars,
            })
        })
        .collect()
}
