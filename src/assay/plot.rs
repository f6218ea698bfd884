//! src/assay/plot.rs
//!
//! Chart geometry in data coordinates: dodged bars, error bars, jittered strip
//! points and significance markers. Nothing here knows about the terminal.
//!
//! Odor categories sit at x = 0, 1, ... The category width is split evenly
//! between the two tests, so with `bar_width = 0.8` the Pre bar is centred at
//! `x - 0.2` and the Post bar at `x + 0.2`, each 0.4 wide.

use rand::{Rng, SeedableRng, rngs::StdRng};

use super::data::Test;
use super::reshape::Observation;
use super::stats::OdorTest;
use super::summary::GroupSummary;
use crate::config::PlotConfig;

/// Headroom above the tallest element, as a fraction of it.
const Y_HEADROOM: f64 = 0.2;
/// Gap between a group's top and its marker, as a fraction of the y span.
const MARKER_GAP: f64 = 0.03;

#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
    pub category: usize,
    pub test: Test,
    /// Bar centre.
    pub x: f64,
    pub width: f64,
    pub height: f64,
    /// Error-bar span, `mean ± sd`.
    pub err: (f64, f64),
}

impl Bar {
    pub fn left(&self) -> f64 {
        self.x - self.width / 2.0
    }

    /// Highest point drawn for this bar.
    pub fn top(&self) -> f64 {
        self.height.max(self.err.1)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StripPoint {
    pub test: Test,
    pub x: f64,
    pub y: f64,
}

/// Significance stars anchored at the centre of a category.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
    pub text: &'static str,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PanelGeometry {
    pub bars: Vec<Bar>,
    pub points: Vec<StripPoint>,
    pub markers: Vec<Marker>,
    /// Category labels at their x position.
    pub categories: Vec<(f64, String)>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    /// Error-bar cap width.
    pub capsize: f64,
}

/// Horizontal offset of a test's bar from its category centre.
pub fn hue_offset(test: Test, bar_width: f64) -> f64 {
    let slot = bar_width / Test::HUE_ORDER.len() as f64;
    let first = -bar_width / 2.0 + slot / 2.0;
    first + slot * test.hue_index() as f64
}

fn category_of(order: &[&str], odor: &str) -> Option<usize> {
    order.iter().position(|&o| o == odor)
}

pub fn layout_bars(summaries: &[GroupSummary], order: &[&str], bar_width: f64) -> Vec<Bar> {
    let width = bar_width / Test::HUE_ORDER.len() as f64;
    summaries
        .iter()
        .filter_map(|s| {
            let category = category_of(order, &s.odor)?;
            Some(Bar {
                category,
                test: s.test,
                x: category as f64 + hue_offset(s.test, bar_width),
                width,
                height: s.mean,
                err: (s.mean - s.sd, s.mean + s.sd),
            })
        })
        .collect()
}

/// One point per observation at its bar centre, jittered uniformly in
/// `[-jitter, jitter]`. Observations whose odor is not in `order` are skipped.
pub fn strip_points(
    observations: &[Observation],
    order: &[&str],
    bar_width: f64,
    jitter: f64,
    seed: u64,
) -> Vec<StripPoint> {
    let mut rng = StdRng::seed_from_u64(seed);
    let jitter = jitter.abs();
    observations
        .iter()
        .filter_map(|o| {
            let category = category_of(order, &o.odor)?;
            let dx = if jitter > 0.0 {
                rng.random_range(-jitter..=jitter)
            } else {
                0.0
            };
            Some(StripPoint {
                test: o.test,
                x: category as f64 + hue_offset(o.test, bar_width) + dx,
                y: o.licks,
            })
        })
        .collect()
}

/// `[0, top * (1 + headroom)]` where `top` covers bars, error bars and points.
pub fn y_bounds(bars: &[Bar], points: &[StripPoint]) -> [f64; 2] {
    let top = bars
        .iter()
        .map(Bar::top)
        .chain(points.iter().map(|p| p.y))
        .fold(0.0_f64, f64::max);
    let top = if top > 0.0 { top } else { 1.0 };
    [0.0, top * (1.0 + Y_HEADROOM)]
}

/// Stars centred above each category's tallest element. Non-significant odors
/// still get a marker with empty text so callers can index by category.
pub fn place_markers(
    tests: &[OdorTest],
    order: &[&str],
    bars: &[Bar],
    points: &[StripPoint],
    y_span: f64,
    bar_width: f64,
) -> Vec<Marker> {
    tests
        .iter()
        .filter_map(|t| {
            let category = category_of(order, &t.odor)?;
            let centre = category as f64;
            let half = bar_width / 2.0;
            let group_top = bars
                .iter()
                .filter(|b| b.category == category)
                .map(Bar::top)
                .chain(
                    points
                        .iter()
                        .filter(|p| (p.x - centre).abs() <= half)
                        .map(|p| p.y),
                )
                .fold(0.0_f64, f64::max);
            Some(Marker {
                x: centre,
                y: group_top + MARKER_GAP * y_span,
                text: t.stars,
            })
        })
        .collect()
}

/// Everything the chart draws for one panel.
pub fn build(
    observations: &[Observation],
    summaries: &[GroupSummary],
    tests: &[OdorTest],
    order: &[&str],
    plot: &PlotConfig,
    seed: u64,
) -> PanelGeometry {
    let bars = layout_bars(summaries, order, plot.bar_width);
    let points = strip_points(observations, order, plot.bar_width, plot.jitter, seed);
    let y_bounds = y_bounds(&bars, &points);
    let markers = place_markers(
        tests,
        order,
        &bars,
        &points,
        y_bounds[1] - y_bounds[0],
        plot.bar_width,
    );
    let categories = order
        .iter()
        .enumerate()
        .map(|(i, o)| (i as f64, o.to_string()))
        .collect();
    PanelGeometry {
        bars,
        points,
        markers,
        categories,
        x_bounds: [-0.5, order.len() as f64 - 0.5],
        y_bounds,
        capsize: plot.capsize,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assay::data::lick_table;
    use crate::assay::reshape::long_format;
    use crate::assay::stats::{DEFAULT_THRESHOLDS, test_odors};
    use crate::assay::summary::summarize;

    const ORDER: [&str; 2] = ["Carvone", "Cis"];

    fn panel_b(plot: &PlotConfig, seed: u64) -> PanelGeometry {
        let obs = long_format(
            &lick_table(),
            &["Pre_Carvone", "Post_Carvone", "Pre_Cis", "Post_Cis"],
        )
        .unwrap();
        let sums = summarize(&obs, &ORDER).unwrap();
        let tests = test_odors(&obs, &ORDER, &DEFAULT_THRESHOLDS).unwrap();
        build(&obs, &sums, &tests, &ORDER, plot, seed)
    }

    #[test]
    fn hue_offsets_split_the_category() {
        assert!((hue_offset(Test::Pre, 0.8) + 0.2).abs() < 1e-12);
        assert!((hue_offset(Test::Post, 0.8) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn bars_are_dodged_and_do_not_overlap() {
        let g = panel_b(&PlotConfig::default(), 1);
        assert_eq!(g.bars.len(), 4);
        let pre = &g.bars[0];
        let post = &g.bars[1];
        assert_eq!(pre.test, Test::Pre);
        assert!((pre.left() + pre.width - post.left()).abs() < 1e-12);
        assert!((pre.height - 12.125).abs() < 1e-9);
        assert!(pre.err.0 < pre.height && pre.height < pre.err.1);
    }

    #[test]
    fn strip_points_stay_within_jitter_of_their_bar() {
        let plot = PlotConfig::default();
        let g = panel_b(&plot, 3);
        assert_eq!(g.points.len(), 16);
        for p in &g.points {
            let nearest = g
                .bars
                .iter()
                .filter(|b| b.test == p.test)
                .map(|b| (p.x - b.x).abs())
                .fold(f64::INFINITY, f64::min);
            assert!(nearest <= plot.jitter + 1e-12);
        }
    }

    #[test]
    fn same_seed_same_picture() {
        let plot = PlotConfig::default();
        assert_eq!(panel_b(&plot, 9).points, panel_b(&plot, 9).points);
        assert_ne!(panel_b(&plot, 9).points, panel_b(&plot, 10).points);
    }

    #[test]
    fn zero_jitter_puts_points_on_bar_centres() {
        let plot = PlotConfig {
            jitter: 0.0,
            ..PlotConfig::default()
        };
        let g = panel_b(&plot, 1);
        assert!(g.points.iter().all(|p| {
            let off = p.x - p.x.round();
            (off - hue_offset(p.test, plot.bar_width)).abs() < 1e-12
        }));
    }

    #[test]
    fn y_bounds_cover_everything_with_headroom() {
        let g = panel_b(&PlotConfig::default(), 1);
        assert_eq!(g.y_bounds[0], 0.0);
        // tallest point is Post_Carvone 31.9
        assert!((g.y_bounds[1] - 31.9 * 1.2).abs() < 1e-9);
        for m in &g.markers {
            assert!(m.y < g.y_bounds[1]);
        }
    }

    #[test]
    fn markers_sit_above_their_group() {
        let g = panel_b(&PlotConfig::default(), 1);
        assert_eq!(g.markers.len(), 2);
        assert_eq!(g.markers[0].text, "*");
        assert_eq!(g.markers[1].text, "");
        assert!(g.markers[0].y > 31.9);
        assert_eq!(g.markers[1].x, 1.0);
    }

    #[test]
    fn empty_input_still_has_a_y_range() {
        assert_eq!(y_bounds(&[], &[]), [0.0, 1.2]);
    }
}
