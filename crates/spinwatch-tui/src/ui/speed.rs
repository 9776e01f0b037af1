//! Speed panel

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use spinwatch_app::ViewSnapshot;

/// Render the speed panel.
pub fn render(frame: &mut Frame, snapshot: &ViewSnapshot, area: Rect) {
    let speed = snapshot.model.speed;
    let row = |label: &'static str, value: f64| {
        Line::from(vec![
            Span::styled(format!("{label:<8}"), Style::default().fg(Color::DarkGray)),
            Span::raw(format!("{value:>10.2}")),
        ])
    };

    let lines =
        vec![row("current", speed.current), row("max", speed.max), row("average", speed.average)];

    let block = Block::default().borders(Borders::ALL).title(" Speed ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use spinwatch_app::{Speed, ViewModel, ViewSnapshot};

    use crate::ui::test_support::draw;

    #[test]
    fn shows_two_decimals() {
        let snapshot = ViewSnapshot::of(&ViewModel {
            speed: Speed { current: 3.5, max: 12.25, average: 0.125 },
            ..ViewModel::default()
        });
        let text = draw(&snapshot, 80, 12);
        assert!(text.contains("3.50"));
        assert!(text.contains("12.25"));
        assert!(text.contains("0.12") || text.contains("0.13"));
    }
}
