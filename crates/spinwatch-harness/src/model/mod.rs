//! Model-based testing.
//!
//! A reference [`ModelClient`] and a [`SimWorld`] consume the same
//! [`Operation`] sequence. The real client, fed by the world, must end up in
//! the same [`ObservableState`] as the model.

mod client;
mod operation;
mod world;

pub use client::{ModelClient, ObservableState};
pub use operation::{Malformed, Operation, SpeedField};
pub use world::SimWorld;
