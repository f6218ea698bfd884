//! src/panels/title.rs
//!
//! Header panel: experiment title plus the current view state.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::assay::ViewOptions;

pub struct TitlePanel {
    pub title: String,
    pub view: ViewOptions,
    pub seed: u64,
}

impl TitlePanel {
    pub fn new(title: &str, view: ViewOptions, seed: u64) -> Self {
        Self {
            title: title.to_string(),
            view,
            seed,
        }
    }

    fn status(&self) -> String {
        let on_off = |b: bool| if b { "on" } else { "off" };
        format!(
            "error bars {}  strip {}  jitter seed {}",
            on_off(self.view.show_error_bars),
            on_off(self.view.show_strip),
            self.seed
        )
    }
}

impl crate::ui::Panel for TitlePanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let line = Line::from(vec![
            Span::styled(
                self.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled(self.status(), Style::default().fg(Color::DarkGray)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        f.render_widget(p, area);
    }
}
