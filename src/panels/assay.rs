//! src/panels/assay.rs
//!
//! Assay panel: grouped Pre/Post bars with error bars, jittered strip points and
//! significance stars on a braille canvas, plus y tick labels on the left and
//! odor labels underneath.
//!
//! Geometry comes precomputed in data coordinates (`PanelGeometry`); this panel
//! only maps it onto terminal cells.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph,
        canvas::{Canvas, Line as Segment, Points, Rectangle},
    },
};

use crate::assay::{PanelAnalysis, Test};

/// Columns reserved for y tick labels: 5 digits, a space and the axis glyph.
const AXIS_WIDTH: u16 = 7;
const Y_TICKS: usize = 5;

/// Bar outlines and error bars follow the terminal's foreground colour.
const INK: Color = Color::Reset;

/// Per-frame drawing toggles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewOptions {
    pub show_error_bars: bool,
    pub show_strip: bool,
}

pub struct AssayPanel<'a> {
    pub analysis: &'a PanelAnalysis,
    pub view: ViewOptions,
    /// Bar fill opacity over a black background.
    pub bar_alpha: f64,
    pub highlighted: bool,
}

impl<'a> AssayPanel<'a> {
    pub fn new(analysis: &'a PanelAnalysis, view: ViewOptions, bar_alpha: f64) -> Self {
        Self {
            analysis,
            view,
            bar_alpha,
            highlighted: false,
        }
    }
}

/// Blend an RGB colour toward black; named colours pass through.
pub fn fade(color: Color, alpha: f64) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let a = alpha.clamp(0.0, 1.0);
            let f = |c: u8| (c as f64 * a).round() as u8;
            Color::Rgb(f(r), f(g), f(b))
        }
        other => other,
    }
}

/// A 1-2-5 step giving roughly `Y_TICKS - 1` intervals up to `max`.
pub fn nice_step(max: f64) -> f64 {
    let raw = (max / (Y_TICKS - 1) as f64).max(f64::MIN_POSITIVE);
    let mag = 10f64.powf(raw.log10().floor());
    let norm = raw / mag;
    let nice = if norm <= 1.0 {
        1.0
    } else if norm <= 2.0 {
        2.0
    } else if norm <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * mag
}

/// Braille dot rows per terminal row.
const DOTS_PER_ROW: u16 = 4;

/// Terminal row (0 = top) holding value `v` inside `[lo, hi]` over `height`
/// rows, truncated onto the braille dot grid the canvas paints on.
fn row_for(v: f64, [lo, hi]: [f64; 2], height: u16) -> usize {
    if height <= 1 || hi <= lo {
        return 0;
    }
    let dots = f64::from(u32::from(height) * u32::from(DOTS_PER_ROW) - 1);
    let frac = ((hi - v) / (hi - lo)).clamp(0.0, 1.0);
    let dot = (frac * dots) as usize;
    (dot / DOTS_PER_ROW as usize).min(height as usize - 1)
}

/// Tick labels for the left gutter, one `Line` per canvas row.
pub fn y_axis_lines(y_bounds: [f64; 2], height: u16) -> Vec<Line<'static>> {
    if height == 0 {
        return Vec::new();
    }
    let mut rows: Vec<String> = vec![format!("{:>6}│", ""); height as usize];
    let step = nice_step(y_bounds[1]);
    let mut v = y_bounds[0];
    while v <= y_bounds[1] + 1e-9 {
        let r = row_for(v, y_bounds, height);
        rows[r] = format!("{:>5.0} ┤", v);
        v += step;
    }
    rows.into_iter().map(Line::from).collect()
}

/// Category names centred under their x position in a line `width` cells wide.
pub fn category_line(categories: &[(f64, String)], x_bounds: [f64; 2], width: u16) -> String {
    let width = width as usize;
    let mut buf = vec![' '; width];
    let span = x_bounds[1] - x_bounds[0];
    if width == 0 || span <= 0.0 {
        return String::new();
    }
    for (x, label) in categories {
        let centre = ((x - x_bounds[0]) / span * width as f64).floor() as isize;
        let len = label.chars().count() as isize;
        let start = (centre - len / 2).clamp(0, (width as isize - len).max(0));
        for (i, ch) in label.chars().enumerate() {
            if let Some(cell) = buf.get_mut(start as usize + i) {
                *cell = ch;
            }
        }
    }
    buf.into_iter().collect::<String>().trim_end().to_string()
}

impl crate::ui::Panel for AssayPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let spec = &self.analysis.spec;
        let g = &self.analysis.geometry;

        let mut block = Block::default().title(spec.title).borders(Borders::ALL);
        if self.highlighted {
            block = block.border_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        }
        let inner = block.inner(area);
        f.render_widget(block, area);

        let rows = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(inner);
        let cols =
            Layout::horizontal([Constraint::Length(AXIS_WIDTH), Constraint::Min(0)]).split(rows[0]);
        let plot_area = cols[1];

        f.render_widget(
            Paragraph::new(y_axis_lines(g.y_bounds, plot_area.height)),
            cols[0],
        );

        // data units per terminal column, used to centre text and fill bars
        let x_span = g.x_bounds[1] - g.x_bounds[0];
        let x_per_cell = x_span / plot_area.width.max(1) as f64;

        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds(g.x_bounds)
            .y_bounds(g.y_bounds)
            .paint(|ctx| {
                // fills: braille gives two dot columns per cell
                for bar in &g.bars {
                    let color = fade(spec.bar_palette[bar.test.hue_index()], self.bar_alpha);
                    let steps = ((bar.width / x_per_cell) * 2.0).ceil().max(1.0) as usize;
                    for i in 0..=steps {
                        let x = bar.left() + bar.width * i as f64 / steps as f64;
                        ctx.draw(&Segment {
                            x1: x,
                            y1: 0.0,
                            x2: x,
                            y2: bar.height,
                            color,
                        });
                    }
                }
                ctx.layer();

                for bar in &g.bars {
                    ctx.draw(&Rectangle {
                        x: bar.left(),
                        y: 0.0,
                        width: bar.width,
                        height: bar.height,
                        color: INK,
                    });
                }
                if self.view.show_error_bars {
                    let half_cap = g.capsize / 2.0;
                    for bar in &g.bars {
                        let (lo, hi) = bar.err;
                        ctx.draw(&Segment {
                            x1: bar.x,
                            y1: lo.max(g.y_bounds[0]),
                            x2: bar.x,
                            y2: hi,
                            color: INK,
                        });
                        for y in [lo, hi] {
                            if y < g.y_bounds[0] {
                                continue;
                            }
                            ctx.draw(&Segment {
                                x1: bar.x - half_cap,
                                y1: y,
                                x2: bar.x + half_cap,
                                y2: y,
                                color: INK,
                            });
                        }
                    }
                }
                ctx.layer();

                if self.view.show_strip {
                    for test in Test::HUE_ORDER {
                        let coords: Vec<(f64, f64)> = g
                            .points
                            .iter()
                            .filter(|p| p.test == test)
                            .map(|p| (p.x, p.y))
                            .collect();
                        ctx.draw(&Points {
                            coords: &coords,
                            color: spec.dot_palette[test.hue_index()],
                        });
                    }
                }

                for m in g.markers.iter().filter(|m| !m.text.is_empty()) {
                    let x = m.x - m.text.len() as f64 * x_per_cell / 2.0;
                    ctx.print(
                        x,
                        m.y,
                        Span::styled(m.text, Style::default().add_modifier(Modifier::BOLD)),
                    );
                }
            });
        f.render_widget(canvas, plot_area);

        let labels = Rect {
            x: plot_area.x,
            y: rows[1].y,
            width: plot_area.width,
            height: rows[1].height,
        };
        f.render_widget(
            Paragraph::new(category_line(&g.categories, g.x_bounds, labels.width)),
            labels,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assay::analyze;
    use crate::config::AppConfig;
    use crate::ui::Panel;
    use ratatui::{Terminal, backend::TestBackend};

    fn screen(panel: &AssayPanel<'_>, w: u16, h: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(w, h)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                panel.draw(f, area)
            })
            .unwrap();
        let buf = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..h {
            for x in 0..w {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    const ALL: ViewOptions = ViewOptions {
        show_error_bars: true,
        show_strip: true,
    };

    #[test]
    fn fade_scales_rgb_only() {
        assert_eq!(fade(Color::Rgb(200, 100, 0), 0.5), Color::Rgb(100, 50, 0));
        assert_eq!(fade(Color::Red, 0.5), Color::Red);
        assert_eq!(fade(Color::Rgb(10, 10, 10), 1.0), Color::Rgb(10, 10, 10));
    }

    #[test]
    fn nice_steps() {
        assert_eq!(nice_step(38.28), 10.0);
        assert_eq!(nice_step(4.0), 1.0);
        assert_eq!(nice_step(7.0), 2.0);
        assert!((nice_step(0.18) - 0.05).abs() < 1e-12);
    }

    #[test]
    fn y_axis_has_zero_at_bottom() {
        let lines = y_axis_lines([0.0, 40.0], 9);
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[8].to_string(), "    0 ┤");
        assert_eq!(lines[0].to_string(), "   40 ┤");
        assert_eq!(lines[1].to_string(), "      │");
    }

    /// Row of the only painted cell when `v` is plotted alone on a braille canvas.
    fn canvas_row(v: f64, y_bounds: [f64; 2], height: u16) -> usize {
        let mut terminal = Terminal::new(TestBackend::new(1, height)).unwrap();
        terminal
            .draw(|f| {
                let canvas = Canvas::default()
                    .marker(Marker::Braille)
                    .x_bounds([0.0, 1.0])
                    .y_bounds(y_bounds)
                    .paint(|ctx| {
                        ctx.draw(&Points {
                            coords: &[(0.0, v)],
                            color: Color::White,
                        })
                    });
                let area = f.area();
                f.render_widget(canvas, area);
            })
            .unwrap();
        let buf = terminal.backend().buffer();
        (0..height)
            .find(|&y| buf[(0, y)].symbol() != " ")
            .unwrap() as usize
    }

    #[test]
    fn ticks_sit_on_the_row_the_canvas_paints() {
        for (y_bounds, height) in [([0.0, 38.28], 17), ([0.0, 45.9], 20), ([0.0, 40.0], 9)] {
            let step = nice_step(y_bounds[1]);
            let mut v = 0.0;
            while v <= y_bounds[1] {
                assert_eq!(
                    row_for(v, y_bounds, height),
                    canvas_row(v, y_bounds, height),
                    "tick {v} in {y_bounds:?} over {height} rows"
                );
                v += step;
            }
        }
    }

    #[test]
    fn highlighted_border_is_yellow() {
        let panels = analyze(&AppConfig::default()).unwrap();
        let mut panel = AssayPanel::new(&panels[0], ALL, 0.5);
        let corner = |panel: &AssayPanel<'_>| {
            let mut terminal = Terminal::new(TestBackend::new(40, 16)).unwrap();
            terminal
                .draw(|f| {
                    let area = f.area();
                    panel.draw(f, area)
                })
                .unwrap();
            terminal.backend().buffer()[(0, 0)].clone()
        };

        let plain = corner(&panel);
        assert_eq!(plain.symbol(), "┌");
        assert_ne!(plain.fg, Color::Yellow);

        panel.highlighted = true;
        let focused = corner(&panel);
        assert_eq!(focused.symbol(), "┌");
        assert_eq!(focused.fg, Color::Yellow);
        assert!(focused.modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn category_labels_are_centred() {
        let cats = vec![(0.0, "Ab".to_string()), (1.0, "Cd".to_string())];
        let line = category_line(&cats, [-0.5, 1.5], 20);
        assert_eq!(line, "    Ab        Cd");
    }

    #[test]
    fn renders_title_labels_and_stars() {
        let panels = analyze(&AppConfig::default()).unwrap();
        let panel = AssayPanel::new(&panels[1], ALL, 0.5);
        let text = screen(&panel, 60, 24);
        assert!(text.contains("Average Licks for Carvone and Cis"));
        assert!(text.contains("Carvone"));
        assert!(text.contains("Cis"));
        assert!(text.contains('*'));
        assert!(text.contains("0 ┤"));
    }

    #[test]
    fn panel_a_has_no_stars() {
        let panels = analyze(&AppConfig::default()).unwrap();
        let panel = AssayPanel::new(&panels[0], ALL, 0.5);
        assert!(!screen(&panel, 60, 24).contains('*'));
    }

    #[test]
    fn tiny_area_does_not_panic() {
        let panels = analyze(&AppConfig::default()).unwrap();
        let panel = AssayPanel::new(&panels[0], ALL, 0.5);
        screen(&panel, 4, 2);
    }
}
