//! Reference client.
//!
//! Straight-line restatement of how the client should react to each
//! [`Operation`]. No decoding, no channels, no renderer: just the expected
//! observable outcome.

use spinwatch_app::{App, Connectivity};

use super::operation::Operation;

/// Observable state compared between model and real client.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservableState {
    /// Rotation count.
    pub rotation_count: u64,
    /// Current, max and average speed.
    pub speed: (f64, f64, f64),
    /// Rotating flag.
    pub is_rotating: bool,
    /// Milliseconds since last movement.
    pub ms_since_last_movement: u64,
    /// Telemetry channel connectivity.
    pub connectivity: Connectivity,
    /// Debug pane visible.
    pub show_debug: bool,
}

impl ObservableState {
    /// Extract the observable state of a real App.
    pub fn of(app: &App) -> Self {
        let model = app.view_model();
        Self {
            rotation_count: model.rotation_count,
            speed: (model.speed.current, model.speed.max, model.speed.average),
            is_rotating: model.rotation_state.is_rotating,
            ms_since_last_movement: model.rotation_state.ms_since_last_movement,
            connectivity: model.connectivity,
            show_debug: app.show_debug(),
        }
    }
}

/// Model client state.
#[derive(Debug, Clone, Default)]
pub struct ModelClient {
    state: ObservableState,
    telemetry_open: bool,
}

impl ModelClient {
    /// Fresh client before any signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expected observable state.
    pub fn observable(&self) -> &ObservableState {
        &self.state
    }

    /// Apply one operation.
    pub fn apply(&mut self, op: &Operation) {
        match op {
            Operation::OpenTelemetry => {
                self.telemetry_open = true;
                self.state.connectivity = Connectivity::Online;
            },
            Operation::LoseTelemetry => {
                self.telemetry_open = false;
                self.state.connectivity = Connectivity::Offline;
            },
            Operation::Rotation(count) if self.telemetry_open => {
                self.state.rotation_count = u64::from(*count);
            },
            Operation::Speed { current, max, average } if self.telemetry_open => {
                if let Some(v) = current.value() {
                    self.state.speed.0 = v;
                }
                if let Some(v) = max.value() {
                    self.state.speed.1 = v;
                }
                if let Some(v) = average.value() {
                    self.state.speed.2 = v;
                }
            },
            Operation::State { rotating, ms } if self.telemetry_open => {
                self.state.is_rotating = *rotating;
                self.state.ms_since_last_movement = u64::from(*ms);
            },
            Operation::InitialSnapshot(count) => {
                self.state.rotation_count = u64::from(*count);
            },
            Operation::ToggleDebug => {
                self.state.show_debug = !self.state.show_debug;
            },
            Operation::Rotation(_)
            | Operation::Speed { .. }
            | Operation::State { .. }
            | Operation::OversizedLine
            | Operation::Malformed(_)
            | Operation::Unsubscribed
            | Operation::InitialSnapshotFailed
            | Operation::DebugMessage(_)
            | Operation::LoseDebug
            | Operation::Tick => {},
        }
    }
}
