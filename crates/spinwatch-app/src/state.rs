//! Observable application state types.
//!
//! [`ViewModel`] is the single authoritative picture of the rotating
//! mechanism as the client understands it. [`ViewSnapshot`] is what the
//! renderer gets: an owned copy plus derived presentation flags, so a
//! renderer can never mutate the model behind the reconciler's back.

use std::collections::VecDeque;

pub use spinwatch_proto::RotationState;

/// Stall duration above which a stopped mechanism is shown with emphasis.
pub const STOPPED_EMPHASIS_THRESHOLD_MS: u64 = 2000;

/// Connectivity of the telemetry channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Connectivity {
    /// No lifecycle signal observed yet.
    #[default]
    Unknown,
    /// Channel open.
    Online,
    /// Channel lost and not yet reopened.
    Offline,
}

/// Speed figures as reported by the server.
///
/// Each field is overwritten independently. `max >= current` is not
/// enforced; the server is authoritative for `max`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Speed {
    /// Instantaneous speed.
    pub current: f64,
    /// Maximum speed.
    pub max: f64,
    /// Average speed.
    pub average: f64,
}

/// Renderer-facing derived state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewModel {
    /// Cumulative full rotations.
    pub rotation_count: u64,
    /// Latest speed figures.
    pub speed: Speed,
    /// Rotating flag and stall duration, always replaced together.
    pub rotation_state: RotationState,
    /// Telemetry channel connectivity.
    pub connectivity: Connectivity,
}

impl ViewModel {
    /// Stopped long enough to deserve emphasis.
    pub fn show_stopped_emphasis(&self) -> bool {
        !self.rotation_state.is_rotating
            && self.rotation_state.ms_since_last_movement > STOPPED_EMPHASIS_THRESHOLD_MS
    }
}

/// Bounded log of diagnostic lines.
///
/// Holds `debug` frames and client diagnostics. Kept outside the
/// [`ViewModel`]: nothing here influences derived state.
#[derive(Debug, Clone)]
pub struct DebugLog {
    lines: VecDeque<String>,
    capacity: usize,
}

impl DebugLog {
    /// Create an empty log holding at most `capacity` lines.
    pub fn new(capacity: usize) -> Self {
        Self { lines: VecDeque::with_capacity(capacity.min(1024)), capacity }
    }

    /// Append a line, evicting the oldest when full.
    pub fn push(&mut self, line: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line.into());
    }

    /// Lines, oldest first.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Number of stored lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True if no line is stored.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

/// Immutable view handed to the renderer after every change.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot {
    /// Copy of the view model.
    pub model: ViewModel,
    /// Derived: stopped for more than [`STOPPED_EMPHASIS_THRESHOLD_MS`].
    pub show_stopped_emphasis: bool,
    /// Debug pane is visible.
    pub show_debug: bool,
    /// Debug pane contents, oldest first.
    pub debug_lines: Vec<String>,
}

impl ViewSnapshot {
    /// Snapshot a model with an empty, hidden debug pane.
    pub fn of(model: &ViewModel) -> Self {
        Self {
            show_stopped_emphasis: model.show_stopped_emphasis(),
            model: model.clone(),
            show_debug: false,
            debug_lines: Vec::new(),
        }
    }
}
