//! Terminal UI for spinwatch
//!
//! A thin shell over [`spinwatch_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`spinwatch_app::Runtime`]
//!
//! This crate only handles terminal rendering and wiring the HTTP transport.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod terminal;
pub mod ui;

pub use spinwatch_app::{App, AppAction, AppEvent, Bridge, ClientConfig, Driver, KeyInput, Runtime};
pub use terminal::{DriverConfig, TerminalDriver, TerminalError};
