//! Application layer for spinwatch
//!
//! Pure state machines and a generic runtime that turn a telemetry push
//! stream into a renderer-facing view model. The same code runs behind the
//! terminal UI and inside the deterministic simulation harness.
//!
//! # Components
//!
//! - [`StateReconciler`]: folds decoded telemetry into the [`ViewModel`]
//! - [`ConnectivityMonitor`]: maps channel lifecycle to [`Connectivity`]
//! - [`Bridge`]: decodes raw driver input into [`AppEvent`]s, dropping
//!   malformed frames
//! - [`App`]: owns the reconciler, monitor and debug log; turns events into
//!   [`AppAction`]s
//! - [`Driver`]: trait for platform-specific I/O
//! - [`Runtime`]: generic orchestration loop using a [`Driver`]

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod bridge;
mod config;
mod connectivity;
mod driver;
mod event;
mod input;
mod reconciler;
mod runtime;
mod state;

pub use action::AppAction;
pub use app::App;
pub use bridge::Bridge;
pub use config::{
    ClientConfig, DEFAULT_DEBUG_CAPACITY, DEFAULT_DEBUG_PATH, DEFAULT_EVENTS_PATH, DEFAULT_INITIAL_PATH,
};
pub use connectivity::{ConnectivityMonitor, LifecycleSignal};
pub use driver::{Driver, DriverInput};
pub use event::AppEvent;
pub use input::KeyInput;
pub use reconciler::{StateReconciler, TelemetryEvent, fold};
pub use runtime::Runtime;
pub use spinwatch_client::{ChannelEvent, ChannelId, TransportError};
pub use state::{
    Connectivity, DebugLog, RotationState, STOPPED_EMPHASIS_THRESHOLD_MS, Speed, ViewModel,
    ViewSnapshot,
};
