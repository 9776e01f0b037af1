//! Standard invariant checks.
//!
//! These invariants capture behavioral properties that must always hold.
//! They verify WHAT must be true, not specific test scenarios.

use spinwatch_app::{Connectivity, STOPPED_EMPHASIS_THRESHOLD_MS};

use super::{Invariant, InvariantKind, InvariantResult, RenderHistory, Violation};

/// Speed figures shown are finite and non-negative.
///
/// Negative or non-finite fields on the wire mean "no update", so they must
/// never reach the view.
pub struct SpeedFiniteNonNegative;

impl Invariant for SpeedFiniteNonNegative {
    fn kind(&self) -> InvariantKind {
        InvariantKind::SpeedFiniteNonNegative
    }

    fn check(&self, history: &RenderHistory) -> InvariantResult {
        for (index, render) in history.renders().iter().enumerate() {
            let speed = render.model.speed;
            for (field, value) in
                [("current", speed.current), ("max", speed.max), ("average", speed.average)]
            {
                if !value.is_finite() || value < 0.0 {
                    return Err(Violation {
                        invariant: self.kind(),
                        message: format!("render {index}: speed.{field} = {value}"),
                    });
                }
            }
        }
        Ok(())
    }
}

/// The stopped emphasis flag is exactly the derived predicate.
pub struct StoppedEmphasisDerived;

impl Invariant for StoppedEmphasisDerived {
    fn kind(&self) -> InvariantKind {
        InvariantKind::StoppedEmphasisDerived
    }

    fn check(&self, history: &RenderHistory) -> InvariantResult {
        for (index, render) in history.renders().iter().enumerate() {
            let state = render.model.rotation_state;
            let expected =
                !state.is_rotating && state.ms_since_last_movement > STOPPED_EMPHASIS_THRESHOLD_MS;
            if render.show_stopped_emphasis != expected {
                return Err(Violation {
                    invariant: self.kind(),
                    message: format!(
                        "render {index}: emphasis {} for {state:?}",
                        render.show_stopped_emphasis
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Once a lifecycle signal has been seen, connectivity is never unknown.
pub struct ConnectivityNeverUnknownAgain;

impl Invariant for ConnectivityNeverUnknownAgain {
    fn kind(&self) -> InvariantKind {
        InvariantKind::ConnectivityNeverUnknownAgain
    }

    fn check(&self, history: &RenderHistory) -> InvariantResult {
        let mut known = false;
        for (index, render) in history.renders().iter().enumerate() {
            match render.model.connectivity {
                Connectivity::Unknown if known => {
                    return Err(Violation {
                        invariant: self.kind(),
                        message: format!("render {index}: connectivity back to unknown"),
                    });
                },
                Connectivity::Unknown => {},
                Connectivity::Online | Connectivity::Offline => known = true,
            }
        }
        Ok(())
    }
}

/// A hidden debug pane is rendered without lines.
pub struct DebugPaneHiddenWhenOff;

impl Invariant for DebugPaneHiddenWhenOff {
    fn kind(&self) -> InvariantKind {
        InvariantKind::DebugPaneHiddenWhenOff
    }

    fn check(&self, history: &RenderHistory) -> InvariantResult {
        for (index, render) in history.renders().iter().enumerate() {
            if !render.show_debug && !render.debug_lines.is_empty() {
                return Err(Violation {
                    invariant: self.kind(),
                    message: format!(
                        "render {index}: {} debug lines while hidden",
                        render.debug_lines.len()
                    ),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use spinwatch_app::{RotationState, ViewModel, ViewSnapshot};

    use super::*;

    fn history(renders: impl IntoIterator<Item = ViewSnapshot>) -> RenderHistory {
        let mut history = RenderHistory::default();
        for render in renders {
            history.record(render);
        }
        history
    }

    fn with_connectivity(connectivity: Connectivity) -> ViewSnapshot {
        ViewSnapshot::of(&ViewModel { connectivity, ..ViewModel::default() })
    }

    #[test]
    fn negative_speed_violates() {
        let mut model = ViewModel::default();
        model.speed.max = -1.0;
        let result = SpeedFiniteNonNegative.check(&history([ViewSnapshot::of(&model)]));
        assert!(result.is_err());
    }

    #[test]
    fn tampered_emphasis_violates() {
        let model = ViewModel {
            rotation_state: RotationState { is_rotating: false, ms_since_last_movement: 5000 },
            ..ViewModel::default()
        };
        let mut snapshot = ViewSnapshot::of(&model);
        assert!(StoppedEmphasisDerived.check(&history([snapshot.clone()])).is_ok());

        snapshot.show_stopped_emphasis = false;
        assert!(StoppedEmphasisDerived.check(&history([snapshot])).is_err());
    }

    #[test]
    fn connectivity_regression_violates() {
        let ok = history([
            with_connectivity(Connectivity::Unknown),
            with_connectivity(Connectivity::Online),
            with_connectivity(Connectivity::Offline),
        ]);
        assert!(ConnectivityNeverUnknownAgain.check(&ok).is_ok());

        let bad = history([
            with_connectivity(Connectivity::Online),
            with_connectivity(Connectivity::Unknown),
        ]);
        let violation = ConnectivityNeverUnknownAgain.check(&bad).expect_err("regression detected");
        assert_eq!(violation.invariant, InvariantKind::ConnectivityNeverUnknownAgain);
    }

    #[test]
    fn hidden_pane_with_lines_violates() {
        let mut snapshot = ViewSnapshot::of(&ViewModel::default());
        snapshot.debug_lines.push("leak".into());
        assert!(DebugPaneHiddenWhenOff.check(&history([snapshot])).is_err());
    }
}
