//! Deterministic simulation harness for spinwatch.
//!
//! Drives the real [`spinwatch_app::Runtime`] through a scripted
//! [`SimDriver`], with push channel traffic produced by seeded
//! [`SimChannel`]s so framing, filtering and decoding all run for real.
//!
//! # Model-Based Testing
//!
//! The `model` module provides a reference client. Operations are applied to
//! both the model and the real client, and their observable states are
//! compared.
//!
//! # Invariant Testing
//!
//! The `invariants` module checks every rendered snapshot. Use
//! [`InvariantRegistry::standard()`] for the common view invariants.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod model;
pub mod scenario;
pub mod sim_driver;

pub use invariants::{
    ConnectivityNeverUnknownAgain, DebugPaneHiddenWhenOff, Invariant, InvariantKind,
    InvariantRegistry, InvariantResult, RenderHistory, SpeedFiniteNonNegative,
    StoppedEmphasisDerived, Violation,
};
pub use model::{Malformed, ModelClient, ObservableState, Operation, SimWorld, SpeedField};
pub use scenario::{SIM_MAX_LINE_BYTES, SimChannel};
pub use sim_driver::{SimDriver, SimDriverError};
