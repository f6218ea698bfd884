//! src/panels/legend.rs
//!
//! Legend panel: "Test" key with the bar and dot colour of Pre and Post.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::assay::fade;
use crate::assay::{Test, data::PanelSpec};

pub struct LegendPanel<'a> {
    pub spec: &'a PanelSpec,
    pub bar_alpha: f64,
}

impl<'a> LegendPanel<'a> {
    pub fn new(spec: &'a PanelSpec, bar_alpha: f64) -> Self {
        Self { spec, bar_alpha }
    }

    fn entry(&self, test: Test) -> Line<'static> {
        let i = test.hue_index();
        Line::from(vec![
            Span::styled(
                "██",
                Style::default().fg(fade(self.spec.bar_palette[i], self.bar_alpha)),
            ),
            Span::raw(" "),
            Span::styled("•", Style::default().fg(self.spec.dot_palette[i])),
            Span::raw(" "),
            Span::raw(test.label()),
        ])
    }
}

impl crate::ui::Panel for LegendPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let lines: Vec<Line> = Test::HUE_ORDER.iter().map(|&t| self.entry(t)).collect();
        let block = Block::default()
            .title(Span::styled(
                "Test",
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL);
        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assay::data::panel_specs;

    #[test]
    fn one_entry_per_test_in_hue_order() {
        let [_, b] = panel_specs();
        let legend = LegendPanel::new(&b, 1.0);
        let pre = legend.entry(Test::Pre);
        assert!(pre.to_string().ends_with("Pre"));
        assert_eq!(pre.spans[0].style.fg, Some(b.bar_palette[0]));
        assert_eq!(pre.spans[2].style.fg, Some(b.dot_palette[0]));
        assert!(legend.entry(Test::Post).to_string().ends_with("Post"));
    }
}
