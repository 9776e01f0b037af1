//! Rotation panel
//!
//! Rotation count plus the rotating / stopped indicator.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use spinwatch_app::ViewSnapshot;

/// Render the rotation panel.
pub fn render(frame: &mut Frame, snapshot: &ViewSnapshot, area: Rect) {
    let model = &snapshot.model;
    let state = model.rotation_state;

    let indicator = if state.is_rotating {
        Span::styled("ROTATING", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else if snapshot.show_stopped_emphasis {
        Span::styled(
            "STOPPED",
            Style::default().fg(Color::White).bg(Color::Red).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("stopped", Style::default().fg(Color::Yellow))
    };

    let lines = vec![
        Line::from(Span::styled(
            model.rotation_count.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(indicator),
        Line::from(Span::styled(
            format!("last movement {} ms ago", state.ms_since_last_movement),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default().borders(Borders::ALL).title(" Rotations ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
