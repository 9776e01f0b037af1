//! UI rendering
//!
//! Rendering functions that convert a [`ViewSnapshot`] into terminal output
//! using ratatui widgets. All functions are pure (no I/O), taking state and
//! drawing widgets.

mod debug;
mod rotation;
mod speed;
mod status;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};
use spinwatch_app::ViewSnapshot;

/// Render the entire UI.
pub fn render(frame: &mut Frame, snapshot: &ViewSnapshot) {
    const MAIN_AREA_MIN_HEIGHT: u16 = 7;
    const DEBUG_MIN_HEIGHT: u16 = 5;
    const STATUS_HEIGHT: u16 = 1;

    let debug = if snapshot.show_debug {
        Constraint::Min(DEBUG_MIN_HEIGHT)
    } else {
        Constraint::Length(0)
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(MAIN_AREA_MIN_HEIGHT),
            debug,
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [main_area, debug_area, status_area] = chunks.as_ref() else {
        return;
    };

    render_main_area(frame, snapshot, *main_area);
    if snapshot.show_debug {
        debug::render(frame, snapshot, *debug_area);
    }
    status::render(frame, snapshot, *status_area);
}

/// Render the main area (rotation panel + speed panel).
fn render_main_area(frame: &mut Frame, snapshot: &ViewSnapshot, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let [rotation_area, speed_area] = chunks.as_ref() else {
        return;
    };

    rotation::render(frame, snapshot, *rotation_area);
    speed::render(frame, snapshot, *speed_area);
}
