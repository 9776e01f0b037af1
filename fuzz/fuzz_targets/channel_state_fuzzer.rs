//! Fuzz target for the push channel state machine
//!
//! Drives an `EventChannel` with arbitrary open / bytes / disconnect / close
//! sequences.
//!
//! # Invariants
//!
//! - Never panics
//! - Reconnect delay stays within [base, max(base, cap)]
//! - A closed channel stays closed
//! - Only subscribed event types are delivered

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use spinwatch_client::{ChannelConfig, ChannelEvent, EventChannel, ReadyState};

#[derive(Debug, Arbitrary)]
enum Op {
    Open,
    Bytes(Vec<u8>),
    Disconnect,
    Fatal,
}

fuzz_target!(|ops: Vec<Op>| {
    let mut channel = EventChannel::new(ChannelConfig::telemetry());
    let mut closed = false;

    for op in ops {
        match op {
            Op::Open if !closed => {
                channel.handle_open();
            }
            Op::Open => {}
            Op::Bytes(bytes) => {
                for event in channel.handle_bytes(&bytes) {
                    if let ChannelEvent::Message { event_type, .. } = event {
                        assert!(channel.is_subscribed(&event_type), "leaked {event_type}");
                    }
                }
            }
            Op::Disconnect => {
                channel.handle_disconnect();
            }
            Op::Fatal => {
                channel.handle_fatal();
                closed = true;
            }
        }

        if closed {
            assert_eq!(channel.ready_state(), ReadyState::Closed);
        }

        let base = channel.reconnection_time();
        let delay = channel.reconnect_delay();
        assert!(delay >= base);
        assert!(delay <= base.max(std::time::Duration::from_secs(30)));
    }
});
