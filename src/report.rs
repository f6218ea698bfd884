//! src/report.rs
//!
//! Plain-text summary of every odor: group sizes, mean ± sd, rank-sum z and p,
//! and the stars drawn on the chart. Used by `--report` and by the stats panel.

use std::fmt::Write as _;

use crate::assay::{PanelAnalysis, Test};

/// One formatted line of the summary table.
#[derive(Clone, Debug, PartialEq)]
pub struct OdorRow {
    pub odor: String,
    pub n: String,
    pub pre: String,
    pub post: String,
    pub z: String,
    pub p: String,
    pub stars: &'static str,
}

pub const HEADER: [&str; 6] = ["Odor", "n pre/post", "Pre", "Post", "z", "p"];

fn mean_sd(analysis: &PanelAnalysis, odor: &str, test: Test) -> (usize, String) {
    analysis
        .summaries
        .iter()
        .find(|s| s.odor == odor && s.test == test)
        .map(|s| (s.n, format!("{:.2} ± {:.2}", s.mean, s.sd)))
        .unwrap_or((0, "-".to_string()))
}

/// Rows in chart order.
pub fn odor_rows(analysis: &PanelAnalysis) -> Vec<OdorRow> {
    analysis
        .tests
        .iter()
        .map(|t| {
            let (n_pre, pre) = mean_sd(analysis, &t.odor, Test::Pre);
            let (n_post, post) = mean_sd(analysis, &t.odor, Test::Post);
            OdorRow {
                odor: t.odor.clone(),
                n: format!("{n_pre}/{n_post}"),
                pre,
                post,
                z: format!("{:+.3}", t.result.statistic),
                p: format!("{:.4}", t.result.pvalue),
                stars: t.stars,
            }
        })
        .collect()
}

/// Column widths fitting the header and every row. Stars trail unpadded.
pub fn widths(rows: &[OdorRow]) -> [usize; 6] {
    let mut w = HEADER.map(|h| h.chars().count());
    for r in rows {
        let cells = [&r.odor, &r.n, &r.pre, &r.post, &r.z, &r.p];
        for (i, c) in cells.iter().enumerate() {
            w[i] = w[i].max(c.chars().count());
        }
    }
    w
}

/// Whole report, one section per panel.
pub fn render(analyses: &[PanelAnalysis]) -> String {
    let mut out = String::new();
    for (i, a) in analyses.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{}", a.spec.title);
        let rows = odor_rows(a);
        let w = widths(&rows);
        let _ = writeln!(
            out,
            "  {:<w0$}  {:>w1$}  {:>w2$}  {:>w3$}  {:>w4$}  {:>w5$}",
            HEADER[0],
            HEADER[1],
            HEADER[2],
            HEADER[3],
            HEADER[4],
            HEADER[5],
            w0 = w[0],
            w1 = w[1],
            w2 = w[2],
            w3 = w[3],
            w4 = w[4],
            w5 = w[5],
        );
        for r in &rows {
            let line = format!(
                "  {:<w0$}  {:>w1$}  {:>w2$}  {:>w3$}  {:>w4$}  {:>w5$}  {}",
                r.odor,
                r.n,
                r.pre,
                r.post,
                r.z,
                r.p,
                r.stars,
                w0 = w[0],
                w1 = w[1],
                w2 = w[2],
                w3 = w[3],
                w4 = w[4],
                w5 = w[5],
            );
            let _ = writeln!(out, "{}", line.trim_end());
        }
    }
    out
}
