//! Real-side world for model-based testing.
//!
//! [`SimWorld`] turns operations into the driver input a real client would
//! see, by routing them through seeded [`SimChannel`]s.

use spinwatch_app::{DriverInput, KeyInput, TransportError};

use super::operation::Operation;
use crate::scenario::SimChannel;

/// Server and user side of one simulated session.
#[derive(Debug)]
pub struct SimWorld {
    telemetry: SimChannel,
    debug: SimChannel,
}

impl SimWorld {
    /// World with channels seeded from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            telemetry: SimChannel::telemetry(seed),
            debug: SimChannel::debug(seed.wrapping_add(1)),
        }
    }

    /// Inputs produced while the client starts: the debug channel opens
    /// straight away.
    pub fn start(&mut self) -> Vec<DriverInput> {
        self.debug.open()
    }

    /// Inputs produced by one operation.
    pub fn apply(&mut self, op: &Operation) -> Vec<DriverInput> {
        match op {
            Operation::OpenTelemetry => self.telemetry.open(),
            Operation::LoseTelemetry => self.telemetry.lose(),
            Operation::OversizedLine => self.telemetry.send_oversized(),
            Operation::Rotation(count) => self.telemetry.send("rotation", &count.to_string()),
            Operation::Speed { current, max, average } => {
                let data = format!("{},{},{}", current.encode(), max.encode(), average.encode());
                self.telemetry.send("speed", &data)
            },
            Operation::State { rotating, ms } => {
                let flag = u8::from(*rotating);
                self.telemetry.send("state", &format!("{flag},{ms}"))
            },
            Operation::Malformed(kind) => {
                let (event_type, data) = kind.frame();
                self.telemetry.send(event_type, data)
            },
            Operation::Unsubscribed => self.telemetry.send("debug", "misrouted"),
            Operation::InitialSnapshot(count) => {
                vec![DriverInput::InitialRotations(Ok(count.to_string()))]
            },
            Operation::InitialSnapshotFailed => {
                vec![DriverInput::InitialRotations(Err(TransportError::Status(503)))]
            },
            Operation::DebugMessage(line) => {
                if !self.debug.is_open() {
                    let mut inputs = self.debug.open();
                    inputs.extend(self.debug.send("debug", line));
                    return inputs;
                }
                self.debug.send("debug", line)
            },
            Operation::LoseDebug => self.debug.lose(),
            Operation::ToggleDebug => vec![DriverInput::Key(KeyInput::Char('d'))],
            Operation::Tick => vec![DriverInput::Tick],
        }
    }
}
