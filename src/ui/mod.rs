pub mod confirm;
pub mod feed_viewer;
pub mod terminal;

use ratatui::prelude::*;
use ratatui::widgets::*;
use std::io::Stdout;

pub type Term = Terminal<CrosstermBackend<Stdout>>;

pub fn render_help_bar(hints: &[(&str, &str)]) -> Paragraph<'static> {
    let spans: Vec<Span<'static>> = hints
        .iter()
        .enumerate()
        .flat_map(|(i, (key, action))| {
            let gap = (i > 0).then(|| Span::raw("  "));
            gap.into_iter().chain([
                Span::styled(format!(" {} ", key), Style::default().fg(Color::Yellow)),
                Span::styled((*action).to_string(), Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();

    Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL).title(" Keys "))
}
