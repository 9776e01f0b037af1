//! Invariant checking for deterministic simulation testing.
//!
//! Invariants are properties that must always hold during execution.
//! Unlike example-based tests that check specific scenarios, invariants
//! verify behavioral properties across all possible execution paths.
//!
//! # Architecture
//!
//! Every snapshot the runtime renders is recorded into a [`RenderHistory`].
//! Registered [`Invariant`] checks run against the history, so they can
//! express both per-render properties and properties over time.
//!
//! # Usage
//!
//! ```ignore
//! let registry = InvariantRegistry::standard();
//! registry.check_all(&history)?;
//! ```

mod checks;
mod snapshot;

pub use checks::{
    ConnectivityNeverUnknownAgain, DebugPaneHiddenWhenOff, SpeedFiniteNonNegative,
    StoppedEmphasisDerived,
};
pub use snapshot::RenderHistory;

/// Invariant check result.
pub type InvariantResult = Result<(), Violation>;

/// Identifies an invariant in violation reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantKind {
    /// Speed figures are finite and non-negative.
    SpeedFiniteNonNegative,
    /// Stopped emphasis matches the rotation state.
    StoppedEmphasisDerived,
    /// Connectivity never goes back to unknown.
    ConnectivityNeverUnknownAgain,
    /// Hidden debug pane carries no lines.
    DebugPaneHiddenWhenOff,
}

impl std::fmt::Display for InvariantKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// Invariant violation with context.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{invariant}: {message}")]
pub struct Violation {
    /// Violated invariant.
    pub invariant: InvariantKind,
    /// Description of what went wrong.
    pub message: String,
}

/// An invariant that can be checked against the render history.
pub trait Invariant: Send + Sync {
    /// Invariant identity for error reporting.
    fn kind(&self) -> InvariantKind;

    /// Check the invariant.
    ///
    /// Returns `Ok(())` if the invariant holds, or a [`Violation`]
    /// describing what went wrong.
    fn check(&self, history: &RenderHistory) -> InvariantResult;
}

/// Registry of invariants to check.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InvariantRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kinds: Vec<_> = self.invariants.iter().map(|inv| inv.kind()).collect();
        f.debug_struct("InvariantRegistry").field("invariants", &kinds).finish()
    }
}

impl InvariantRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// Create a registry with the standard view invariants.
    ///
    /// Includes:
    /// - [`SpeedFiniteNonNegative`]
    /// - [`StoppedEmphasisDerived`]
    /// - [`ConnectivityNeverUnknownAgain`]
    /// - [`DebugPaneHiddenWhenOff`]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(SpeedFiniteNonNegative);
        registry.add(StoppedEmphasisDerived);
        registry.add(ConnectivityNeverUnknownAgain);
        registry.add(DebugPaneHiddenWhenOff);
        registry
    }

    /// Add an invariant to the registry.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Check all invariants.
    ///
    /// Returns `Ok(())` if all invariants hold, or all violations found.
    pub fn check_all(&self, history: &RenderHistory) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(history).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Number of registered invariants.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_has_invariants() {
        let registry = InvariantRegistry::standard();
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn empty_history_passes_invariants() {
        let registry = InvariantRegistry::standard();
        assert!(registry.check_all(&RenderHistory::default()).is_ok());
    }
}
