//! Debug pane
//!
//! Tail of the debug log, newest line at the bottom.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};
use spinwatch_app::ViewSnapshot;

const BORDER_SIZE: u16 = 2;

/// Render the debug pane.
pub fn render(frame: &mut Frame, snapshot: &ViewSnapshot, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Debug ");

    let visible_height = area.height.saturating_sub(BORDER_SIZE) as usize;
    let skip = snapshot.debug_lines.len().saturating_sub(visible_height);

    let items: Vec<ListItem> = snapshot
        .debug_lines
        .iter()
        .skip(skip)
        .map(|line| {
            let style = if line.starts_with("[client]") {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(Span::styled(line.as_str(), style)))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
