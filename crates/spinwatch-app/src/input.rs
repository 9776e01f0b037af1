//! Terminal-agnostic keyboard input.

/// Keyboard input abstraction.
///
/// Decouples application logic from terminal libraries so the App can be
/// driven from simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Tab key (toggle debug pane).
    Tab,
    /// Escape key (quit).
    Esc,
}
