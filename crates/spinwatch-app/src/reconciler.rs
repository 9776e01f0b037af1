//! Telemetry fold.
//!
//! [`fold`] is the pure function `ViewModel × TelemetryEvent -> ViewModel`.
//! [`StateReconciler`] owns the one live [`ViewModel`] and applies events to
//! it in arrival order, one at a time.
//!
//! # Invariants
//!
//! - Arrival order is authoritative. Events are never reordered or batched.
//! - `rotation_count` is last-writer-wins: the server sends the full count,
//!   and the one-shot initial snapshot races with the first live event with
//!   no tie-breaker.
//! - A `None` speed field leaves the previous value untouched.
//! - `rotation_state` is replaced as a whole, never field by field.
//! - Connectivity is only written through `set_connectivity`, which is
//!   crate-private and called only from the App's lifecycle path.

use spinwatch_proto::SpeedSample;

use crate::{Connectivity, RotationState, ViewModel};

/// A decoded telemetry value ready to be folded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TelemetryEvent {
    /// Live `rotation` frame.
    Rotation(u64),
    /// Result of the one-shot initial snapshot fetch.
    InitialRotations(u64),
    /// Live `speed` frame.
    Speed(SpeedSample),
    /// Live `state` frame.
    State(RotationState),
}

/// Fold one event into a model.
pub fn fold(mut model: ViewModel, event: &TelemetryEvent) -> ViewModel {
    match *event {
        TelemetryEvent::Rotation(count) | TelemetryEvent::InitialRotations(count) => {
            model.rotation_count = count;
        },
        TelemetryEvent::Speed(sample) => {
            if let Some(current) = sample.current {
                model.speed.current = current;
            }
            if let Some(max) = sample.max {
                model.speed.max = max;
            }
            if let Some(average) = sample.average {
                model.speed.average = average;
            }
        },
        TelemetryEvent::State(state) => {
            model.rotation_state = state;
        },
    }
    model
}

/// Single owner of the live view model.
#[derive(Debug, Clone, Default)]
pub struct StateReconciler {
    model: ViewModel,
}

impl StateReconciler {
    /// Start from all-zero / unknown defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current model.
    pub fn model(&self) -> &ViewModel {
        &self.model
    }

    /// Apply one telemetry event. Returns true if the model changed.
    pub fn apply(&mut self, event: TelemetryEvent) -> bool {
        let next = fold(self.model.clone(), &event);
        if next.rotation_count < self.model.rotation_count {
            tracing::debug!(
                from = self.model.rotation_count,
                to = next.rotation_count,
                "rotation count moved backwards"
            );
        }

        let changed = next != self.model;
        self.model = next;
        tracing::trace!(?event, changed, "telemetry folded");
        changed
    }

    /// Set connectivity. Returns true if it changed.
    pub(crate) fn set_connectivity(&mut self, connectivity: Connectivity) -> bool {
        let changed = self.model.connectivity != connectivity;
        self.model.connectivity = connectivity;
        changed
    }
}
