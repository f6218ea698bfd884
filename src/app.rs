//! src/app.rs
//!
//! Odor lick assay viewer.
//! Reshapes the fixed Pre/Post lick measurements, draws one grouped bar + strip
//! chart per odor pair, runs a Wilcoxon rank-sum test per odor, and marks
//! significant odors with stars above their bars.
//!
//! # Top-Level Application (`app.rs`)
//!
//! Computes both panels once, then either prints the summary table
//! (`--report`) or runs the terminal UI main loop.
//!
//! ## Overview
//! The application:
//! - Renders two charts side by side: Ethyl/Citral and Carvone/Cis.
//! - Shows a legend per chart and a shared statistics table.
//! - Provides keyboard controls for focus, jitter and what is drawn.
//!
//! # Building and Running
//!
//! 1. Terminal UI:
//!    ```text
//!    cargo run --release
//!    ```
//!
//! 2. Text report only:
//!    ```text
//!    cargo run --release -- --report
//!    ```
//!
//! 3. Inspect the effective configuration:
//!    ```text
//!    cargo run --release -- --dump-config > odor-licks.toml
//!    ```
//!
//! ### Environment Notes
//! - Terminal UI uses the `ratatui` and `crossterm` crates.
//! - Logs go to the file named in `[log]` (default `odor-licks.log`);
//!   `RUST_LOG` overrides the configured level.
//!
//! # Keyboard Controls (Interactive)
//!
//! - **Tab** — Cycle focus between the two charts. The focused chart's border is highlighted.
//! - **j** — Re-jitter the strip points of the focused chart with a fresh seed.
//! - **e** — Toggle error bars (mean ± sd).
//! - **d** — Toggle strip points.
//! - **q** / **Esc** — Quit and restore terminal state.
//!
//! # What Is Drawn
//!
//! ### Bars
//! Bar height is the group mean; error bars span one sample standard deviation
//! either side. Pre sits left of the odor label, Post right.
//!
//! ### Strip Points
//! Every animal's value, jittered horizontally by at most `plot.jitter` around
//! its bar centre. The jitter is seeded, so the picture is stable between frames.
//!
//! ### Stars
//! `***` p < 0.001, `**` p < 0.01, `*` p < 0.05 (cut-offs in `[stats]`).
//! Odors without a significant difference get no marker.

use std::time::{Duration, Instant};

use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use rand::Rng;
use ratatui::{
    DefaultTerminal,
    layout::{Constraint, Direction},
};
use tracing::{debug, info};

use crate::assay::{PanelAnalysis, analyze};
use crate::cli::Args;
use crate::config::AppConfig;
use crate::panels::{AssayPanel, KeysPanel, LegendPanel, StatsPanel, TitlePanel, ViewOptions};
use crate::report;
use crate::ui::{Node, group, leaf, row};

const KEYS: &[(&str, &str)] = &[
    ("TAB", "Focus"),
    ("J", "Re-jitter"),
    ("E", "Error bars"),
    ("D", "Dots"),
    ("Q", "Quit"),
];

/// Everything the keyboard can change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewState {
    pub focused: usize,
    pub view: ViewOptions,
}

impl ViewState {
    pub fn new(cfg: &AppConfig) -> Self {
        Self {
            focused: 0,
            view: ViewOptions {
                show_error_bars: cfg.plot.show_error_bars,
                show_strip: cfg.plot.show_strip,
            },
        }
    }
}

/// Key outcomes that need more than a `ViewState` change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    None,
    Rejitter,
    Quit,
}

pub fn handle_key(state: &mut ViewState, code: KeyCode, panels: usize) -> Action {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Tab => {
            state.focused = (state.focused + 1) % panels.max(1);
            Action::None
        }
        KeyCode::Char('e') => {
            state.view.show_error_bars = !state.view.show_error_bars;
            Action::None
        }
        KeyCode::Char('d') => {
            state.view.show_strip = !state.view.show_strip;
            Action::None
        }
        KeyCode::Char('j') => Action::Rejitter,
        _ => Action::None,
    }
}

/// Compose the screen for one frame.
pub fn layout<'a>(analyses: &'a [PanelAnalysis], state: &ViewState, cfg: &AppConfig) -> Node<'a> {
    let alpha = cfg.plot.bar_alpha;

    let charts: Vec<Node<'a>> = analyses
        .iter()
        .enumerate()
        .map(|(i, a)| {
            let mut chart = AssayPanel::new(a, state.view, alpha);
            chart.highlighted = i == state.focused;
            group(
                Direction::Vertical,
                vec![Constraint::Min(0), Constraint::Length(4)],
                vec![leaf(chart), leaf(LegendPanel::new(&a.spec, alpha))],
            )
        })
        .collect();

    let seed = analyses.get(state.focused).map(|a| a.seed).unwrap_or(0);
    group(
        Direction::Vertical,
        vec![
            Constraint::Length(3),
            Constraint::Min(12),
            Constraint::Length(8),
            Constraint::Length(3),
        ],
        vec![
            leaf(TitlePanel::new("Odor Exposure Lick Assay", state.view, seed)),
            row(charts),
            leaf(StatsPanel::new(analyses)),
            leaf(KeysPanel::new(KEYS)),
        ],
    )
}

fn ui_loop(
    terminal: &mut DefaultTerminal,
    analyses: &mut [PanelAnalysis],
    cfg: &AppConfig,
) -> Result<()> {
    let mut state = ViewState::new(cfg);
    let frame_time = Duration::from_millis(cfg.ui.frame_ms);

    loop {
        let frame_start = Instant::now();

        {
            let root = layout(analyses, &state, cfg);
            terminal.draw(|f| {
                let area = f.area();
                root.draw(f, area)
            })?;
        }

        while event::poll(Duration::from_millis(0))? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match handle_key(&mut state, key.code, analyses.len()) {
                Action::Quit => {
                    info!("quit requested");
                    return Ok(());
                }
                Action::Rejitter => {
                    if let Some(a) = analyses.get_mut(state.focused) {
                        let seed: u64 = rand::rng().random();
                        debug!(panel = a.spec.title, seed, "re-jitter");
                        a.rejitter(cfg, seed);
                    }
                }
                Action::None => {}
            }
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            std::thread::sleep(frame_time - elapsed);
        }
    }
}

pub fn run(args: &Args, cfg: &AppConfig) -> Result<()> {
    let mut analyses = analyze(cfg)?;
    info!(panels = analyses.len(), seed = cfg.plot.seed, "analysis ready");

    if args.report {
        print!("{}", report::render(&analyses));
        return Ok(());
    }

    let mut terminal = ratatui::init();
    let result = ui_loop(&mut terminal, &mut analyses, cfg);
    ratatui::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn keys_toggle_and_cycle() {
        let cfg = AppConfig::default();
        let mut s = ViewState::new(&cfg);
        assert_eq!(handle_key(&mut s, KeyCode::Tab, 2), Action::None);
        assert_eq!(s.focused, 1);
        handle_key(&mut s, KeyCode::Tab, 2);
        assert_eq!(s.focused, 0);

        handle_key(&mut s, KeyCode::Char('e'), 2);
        assert!(!s.view.show_error_bars);
        handle_key(&mut s, KeyCode::Char('d'), 2);
        assert!(!s.view.show_strip);

        assert_eq!(handle_key(&mut s, KeyCode::Char('j'), 2), Action::Rejitter);
        assert_eq!(handle_key(&mut s, KeyCode::Esc, 2), Action::Quit);
        assert_eq!(handle_key(&mut s, KeyCode::Char('x'), 2), Action::None);
    }

    #[test]
    fn view_state_starts_from_config() {
        let mut cfg = AppConfig::default();
        cfg.plot.show_strip = false;
        let s = ViewState::new(&cfg);
        assert!(!s.view.show_strip);
        assert!(s.view.show_error_bars);
    }

    #[test]
    fn full_screen_renders() {
        let cfg = AppConfig::default();
        let analyses = analyze(&cfg).unwrap();
        let state = ViewState::new(&cfg);
        let root = layout(&analyses, &state, &cfg);
        let mut terminal = Terminal::new(TestBackend::new(140, 45)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                root.draw(f, area)
            })
            .unwrap();
        let buf = terminal.backend().buffer();
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Odor Exposure Lick Assay"));
        assert!(text.contains("Average Licks for Ethyl and Citral"));
        assert!(text.contains("Average Licks for Carvone and Cis"));
        assert!(text.contains("Wilcoxon rank-sum"));
        assert!(text.contains("Controls"));
    }
}
