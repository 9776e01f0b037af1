//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` provides the same interface as `TerminalDriver` but for
//! deterministic testing. It implements [`Driver`] so the same
//! [`spinwatch_app::Runtime`] orchestration code runs in both production and
//! simulation.

use std::collections::{HashMap, VecDeque};

use spinwatch_app::{ChannelId, Driver, DriverInput, TransportError, ViewSnapshot};

use crate::invariants::{InvariantRegistry, RenderHistory, Violation};

/// Error type for simulation driver.
#[derive(Debug, thiserror::Error)]
pub enum SimDriverError {
    /// A rendered snapshot broke an invariant.
    #[error("invariant violation: {}", join(.0))]
    Invariant(Vec<Violation>),

    /// Rendering was configured to fail.
    #[error("render failed: {0}")]
    Render(String),
}

fn join(violations: &[Violation]) -> String {
    violations.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// Simulation driver for deterministic testing.
///
/// Inputs are queued up front; the run ends once the queue is drained.
/// Renders, opened channels and fetch requests are captured for assertions.
#[derive(Debug, Default)]
pub struct SimDriver {
    pending: VecDeque<DriverInput>,
    history: RenderHistory,
    opened: Vec<(ChannelId, String)>,
    fetches: Vec<String>,
    initial_rotations: HashMap<String, Result<String, TransportError>>,
    failing_endpoints: HashMap<String, TransportError>,
    fail_render: bool,
    stopped: bool,
    invariants: Option<InvariantRegistry>,
}

impl SimDriver {
    /// Create a new simulation driver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable invariant checking on every render.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(registry);
        self
    }

    /// Answer the initial rotation fetch for `url` with `response`.
    ///
    /// The answer is queued behind whatever input is pending when the
    /// fetch is requested.
    #[must_use]
    pub fn with_initial_rotations(
        mut self,
        url: impl Into<String>,
        response: Result<String, TransportError>,
    ) -> Self {
        self.initial_rotations.insert(url.into(), response);
        self
    }

    /// Make `open_channel` fail for `endpoint`.
    #[must_use]
    pub fn with_failing_endpoint(mut self, endpoint: impl Into<String>, error: TransportError) -> Self {
        self.failing_endpoints.insert(endpoint.into(), error);
        self
    }

    /// Make every render fail.
    #[must_use]
    pub fn with_failing_render(mut self) -> Self {
        self.fail_render = true;
        self
    }

    /// Queue one input.
    pub fn inject(&mut self, input: DriverInput) {
        self.pending.push_back(input);
    }

    /// Queue several inputs in order.
    pub fn inject_all(&mut self, inputs: impl IntoIterator<Item = DriverInput>) {
        self.pending.extend(inputs);
    }

    /// Queue a tick.
    pub fn inject_tick(&mut self) {
        self.pending.push_back(DriverInput::Tick);
    }

    /// Check if there are pending inputs.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Everything rendered so far.
    pub fn history(&self) -> &RenderHistory {
        &self.history
    }

    /// Most recent render.
    pub fn last_render(&self) -> Option<&ViewSnapshot> {
        self.history.latest()
    }

    /// Channels opened, in order.
    pub fn opened_channels(&self) -> &[(ChannelId, String)] {
        &self.opened
    }

    /// Initial rotation URLs requested, in order.
    pub fn fetches(&self) -> &[String] {
        &self.fetches
    }

    /// `stop` has been called.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;

    async fn next_input(&mut self) -> Result<Option<DriverInput>, Self::Error> {
        Ok(self.pending.pop_front())
    }

    fn open_channel(&mut self, channel: ChannelId, endpoint: &str) -> Result<(), TransportError> {
        if let Some(error) = self.failing_endpoints.get(endpoint) {
            return Err(error.clone());
        }
        tracing::debug!(%channel, endpoint, "sim channel opened");
        self.opened.push((channel, endpoint.to_owned()));
        Ok(())
    }

    fn fetch_initial_rotations(&mut self, url: &str) {
        self.fetches.push(url.to_owned());
        if let Some(response) = self.initial_rotations.remove(url) {
            self.pending.push_back(DriverInput::InitialRotations(response));
        }
    }

    fn render(&mut self, snapshot: &ViewSnapshot) -> Result<(), Self::Error> {
        if self.fail_render {
            return Err(SimDriverError::Render("configured to fail".into()));
        }
        self.history.record(snapshot.clone());
        if let Some(registry) = &self.invariants {
            registry.check_all(&self.history).map_err(SimDriverError::Invariant)?;
        }
        Ok(())
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}
