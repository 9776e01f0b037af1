//! Status bar
//!
//! Displays connectivity and key help.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use spinwatch_app::{Connectivity, ViewSnapshot};

/// Render the status bar.
pub fn render(frame: &mut Frame, snapshot: &ViewSnapshot, area: Rect) {
    let connectivity = match snapshot.model.connectivity {
        Connectivity::Unknown => {
            Span::styled("Connecting...", Style::default().fg(Color::Yellow))
        },
        Connectivity::Online => Span::styled(
            "Online",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Connectivity::Offline => Span::styled(
            "Offline",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    let status_line = Line::from(vec![
        Span::raw(" "),
        connectivity,
        Span::styled(" | d: debug  c: clear  q: quit", Style::default().fg(Color::Gray)),
    ]);

    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use spinwatch_app::{Connectivity, ViewModel, ViewSnapshot};

    use crate::ui::test_support::draw;

    #[test]
    fn shows_each_connectivity() {
        for (connectivity, label) in [
            (Connectivity::Unknown, "Connecting"),
            (Connectivity::Online, "Online"),
            (Connectivity::Offline, "Offline"),
        ] {
            let snapshot = ViewSnapshot::of(&ViewModel { connectivity, ..ViewModel::default() });
            assert!(draw(&snapshot, 80, 12).contains(label), "{label}");
        }
    }
}
