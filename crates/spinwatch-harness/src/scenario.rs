//! Scripted push channel.
//!
//! [`SimChannel`] plays the server side of one push channel. Frames are
//! encoded to wire bytes, split at seeded random positions, and pushed
//! through a real [`EventChannel`], so simulation exercises the same
//! framing and filtering code as production. Output is a stream of
//! [`DriverInput`] ready for a [`crate::SimDriver`].

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use spinwatch_app::DriverInput;
use spinwatch_client::{ChannelConfig, ChannelId, EventChannel, ReadyState};

/// Line length cap used by simulated channels.
pub const SIM_MAX_LINE_BYTES: usize = 256;

const LINE_ENDINGS: [&str; 3] = ["\n", "\r", "\r\n"];

/// Server side of one simulated push channel.
#[derive(Debug)]
pub struct SimChannel {
    id: ChannelId,
    channel: EventChannel,
    rng: ChaCha8Rng,
    next_event_id: u64,
}

impl SimChannel {
    /// Telemetry channel with the given seed.
    pub fn telemetry(seed: u64) -> Self {
        Self::new(ChannelId::Telemetry, ChannelConfig::telemetry(), seed)
    }

    /// Debug channel with the given seed.
    pub fn debug(seed: u64) -> Self {
        Self::new(ChannelId::Debug, ChannelConfig::debug(), seed)
    }

    fn new(id: ChannelId, config: ChannelConfig, seed: u64) -> Self {
        let config = ChannelConfig { max_line_bytes: SIM_MAX_LINE_BYTES, ..config };
        Self {
            id,
            channel: EventChannel::new(config),
            rng: ChaCha8Rng::seed_from_u64(seed),
            next_event_id: 1,
        }
    }

    /// Channel is currently open.
    pub fn is_open(&self) -> bool {
        self.channel.ready_state() == ReadyState::Open
    }

    /// Last event ID the client would send on reconnect.
    pub fn last_event_id(&self) -> Option<&str> {
        self.channel.last_event_id()
    }

    /// Accept a connection.
    pub fn open(&mut self) -> Vec<DriverInput> {
        let event = self.channel.handle_open();
        vec![self.wrap(event)]
    }

    /// Drop the connection.
    pub fn lose(&mut self) -> Vec<DriverInput> {
        let event = self.channel.handle_disconnect();
        vec![self.wrap(event)]
    }

    /// Send one named event. Nothing arrives unless the channel is open.
    pub fn send(&mut self, event_type: &str, data: &str) -> Vec<DriverInput> {
        if !self.is_open() {
            return vec![];
        }
        let wire = self.encode(event_type, data);
        self.deliver(wire.as_bytes())
    }

    /// Send a line longer than the client accepts.
    pub fn send_oversized(&mut self) -> Vec<DriverInput> {
        if !self.is_open() {
            return vec![];
        }
        let wire = format!("data: {}\n\n", "x".repeat(SIM_MAX_LINE_BYTES * 2));
        self.deliver(wire.as_bytes())
    }

    /// Send a comment line. Never produces an event.
    pub fn send_comment(&mut self, text: &str) -> Vec<DriverInput> {
        if !self.is_open() {
            return vec![];
        }
        let wire = format!(":{text}\n");
        self.deliver(wire.as_bytes())
    }

    /// Encode a frame with a fresh event ID and a random line ending.
    fn encode(&mut self, event_type: &str, data: &str) -> String {
        let eol = LINE_ENDINGS[self.rng.gen_range(0..LINE_ENDINGS.len())];
        let id = self.next_event_id;
        self.next_event_id = self.next_event_id.saturating_add(1);

        let mut wire = format!("id: {id}{eol}event: {event_type}{eol}");
        for line in data.split('\n') {
            wire.push_str("data: ");
            wire.push_str(line);
            wire.push_str(eol);
        }
        wire.push_str(eol);
        wire
    }

    /// Push bytes through the client channel in random chunks.
    fn deliver(&mut self, bytes: &[u8]) -> Vec<DriverInput> {
        let mut inputs = Vec::new();
        let mut rest = bytes;
        while !rest.is_empty() {
            let take = self.rng.gen_range(1..=rest.len());
            let (chunk, tail) = rest.split_at(take);
            rest = tail;
            for event in self.channel.handle_bytes(chunk) {
                inputs.push(self.wrap(event));
            }
        }
        inputs
    }

    fn wrap(&self, event: spinwatch_client::ChannelEvent) -> DriverInput {
        DriverInput::Channel { channel: self.id, event }
    }
}

#[cfg(test)]
mod tests {
    use spinwatch_client::ChannelEvent;

    use super::*;

    #[test]
    fn frames_only_flow_when_open() {
        let mut channel = SimChannel::telemetry(7);
        assert!(channel.send("rotation", "1").is_empty());

        channel.open();
        let inputs = channel.send("rotation", "1");
        assert_eq!(
            inputs,
            vec![DriverInput::Channel {
                channel: ChannelId::Telemetry,
                event: ChannelEvent::Message { event_type: "rotation".into(), data: "1".into() },
            }]
        );
        assert_eq!(channel.last_event_id(), Some("1"));
    }

    #[test]
    fn chunking_is_deterministic_per_seed() {
        let run = |seed| {
            let mut channel = SimChannel::telemetry(seed);
            channel.open();
            (0..20).flat_map(|i| channel.send("speed", &format!("{i},1,1"))).collect::<Vec<_>>()
        };
        assert_eq!(run(3), run(3));
    }

    #[test]
    fn oversized_line_is_transient_error() {
        let mut channel = SimChannel::telemetry(1);
        channel.open();
        assert_eq!(
            channel.send_oversized(),
            vec![DriverInput::Channel {
                channel: ChannelId::Telemetry,
                event: ChannelEvent::Error { is_open: true },
            }]
        );
        assert!(channel.is_open());
    }

    #[test]
    fn unsubscribed_types_filtered() {
        let mut channel = SimChannel::debug(1);
        channel.open();
        assert!(channel.send("rotation", "5").is_empty());
        assert_eq!(channel.send("debug", "hello").len(), 1);
        assert!(channel.send_comment("keepalive").is_empty());
    }
}
