//! src/panels/stats.rs
//!
//! Stats panel: per-odor group sizes, mean ± sd and the Pre vs Post rank-sum
//! result for every panel, with significant rows emphasised.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::assay::PanelAnalysis;
use crate::report::{HEADER, odor_rows, widths};

pub struct StatsPanel<'a> {
    pub analyses: &'a [PanelAnalysis],
}

impl<'a> StatsPanel<'a> {
    pub fn new(analyses: &'a [PanelAnalysis]) -> Self {
        Self { analyses }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let rows: Vec<_> = self.analyses.iter().flat_map(odor_rows).collect();
        let w = widths(&rows);
        let head = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);

        let mut lines = vec![Line::from(
            HEADER
                .iter()
                .zip(w)
                .map(|(h, w)| Span::styled(format!("{h:<w$}  "), head))
                .collect::<Vec<_>>(),
        )];
        for r in rows {
            let style = if r.stars.is_empty() {
                Style::default()
            } else {
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
            };
            let cells = [r.odor, r.n, r.pre, r.post, r.z, r.p];
            let mut spans: Vec<Span> = cells
                .into_iter()
                .zip(w)
                .map(|(c, w)| Span::styled(format!("{c:<w$}  "), style))
                .collect();
            spans.push(Span::styled(r.stars, style));
            lines.push(Line::from(spans));
        }
        lines
    }
}

impl crate::ui::Panel for StatsPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .title("Wilcoxon rank-sum, Pre vs Post")
            .borders(Borders::ALL);
        f.render_widget(Paragraph::new(self.lines()).block(block), area);
    }
}
