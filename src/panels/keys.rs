//! src/panels/keys.rs
//!
//! Key-binding help line.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub struct KeysPanel {
    pub bindings: &'static [(&'static str, &'static str)],
}

impl KeysPanel {
    pub fn new(bindings: &'static [(&'static str, &'static str)]) -> Self {
        Self { bindings }
    }
}

impl crate::ui::Panel for KeysPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let key = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let spans: Vec<Span> = self
            .bindings
            .iter()
            .flat_map(|(k, action)| {
                [
                    Span::styled(*k, key),
                    Span::raw(format!("={action}  ")),
                ]
            })
            .collect();
        let p = Paragraph::new(Line::from(spans))
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Controls").borders(Borders::ALL));
        f.render_widget(p, area);
    }
}
