//! App integration tests.
//!
//! Raw channel frames go through the Bridge and into the App, the same path
//! the Runtime takes, and the rendered snapshot is checked.

use spinwatch_app::{
    App, AppAction, Bridge, ChannelEvent, ChannelId, ClientConfig, Connectivity, DriverInput,
    ViewSnapshot,
};

struct Client {
    app: App,
    bridge: Bridge,
    renders: usize,
}

impl Client {
    fn new() -> Self {
        Self {
            app: App::new(ClientConfig::from_server("http://rig")),
            bridge: Bridge::new(),
            renders: 0,
        }
    }

    fn input(&mut self, input: DriverInput) {
        for event in self.bridge.handle_input(input) {
            let actions = self.app.handle(event);
            self.renders += actions.iter().filter(|a| **a == AppAction::Render).count();
        }
    }

    fn frame(&mut self, event_type: &str, data: &str) {
        self.input(DriverInput::Channel {
            channel: ChannelId::Telemetry,
            event: ChannelEvent::Message { event_type: event_type.into(), data: data.into() },
        });
    }

    fn lifecycle(&mut self, event: ChannelEvent) {
        self.input(DriverInput::Channel { channel: ChannelId::Telemetry, event });
    }

    fn snapshot(&self) -> ViewSnapshot {
        self.app.snapshot()
    }
}

#[test]
fn rotation_sets_count_and_is_idempotent() {
    let mut client = Client::new();
    client.frame("rotation", "42");
    let once = client.snapshot();

    client.frame("rotation", "42");
    assert_eq!(client.snapshot(), once);
    assert_eq!(once.model.rotation_count, 42);
}

#[test]
fn speed_with_gap_keeps_max() {
    let mut client = Client::new();
    client.frame("speed", "1,7.5,1");
    client.frame("speed", "3.5,,9.1");

    let speed = client.snapshot().model.speed;
    assert_eq!(speed.current, 3.5);
    assert_eq!(speed.max, 7.5);
    assert_eq!(speed.average, 9.1);
}

#[test]
fn state_frames_drive_emphasis() {
    let mut client = Client::new();

    client.frame("state", "1,450");
    let snapshot = client.snapshot();
    assert!(snapshot.model.rotation_state.is_rotating);
    assert_eq!(snapshot.model.rotation_state.ms_since_last_movement, 450);
    assert!(!snapshot.show_stopped_emphasis);

    client.frame("state", "0,2500");
    let snapshot = client.snapshot();
    assert!(!snapshot.model.rotation_state.is_rotating);
    assert!(snapshot.show_stopped_emphasis);

    client.frame("state", "0,1000");
    let snapshot = client.snapshot();
    assert_eq!(snapshot.model.rotation_state.ms_since_last_movement, 1000);
    assert!(!snapshot.show_stopped_emphasis);
}

#[test]
fn lifecycle_drives_connectivity() {
    let mut client = Client::new();
    client.lifecycle(ChannelEvent::Opened);
    client.lifecycle(ChannelEvent::Error { is_open: true });
    assert_eq!(client.snapshot().model.connectivity, Connectivity::Online);

    client.lifecycle(ChannelEvent::Error { is_open: false });
    assert_eq!(client.snapshot().model.connectivity, Connectivity::Offline);

    client.lifecycle(ChannelEvent::Opened);
    assert_eq!(client.snapshot().model.connectivity, Connectivity::Online);
}

#[test]
fn malformed_rotation_neither_mutates_nor_renders() {
    let mut client = Client::new();
    client.frame("rotation", "5");
    let before = client.snapshot();
    let renders = client.renders;

    client.frame("rotation", "abc");
    assert_eq!(client.snapshot(), before);
    assert_eq!(client.renders, renders);
    assert_eq!(client.bridge.dropped_frames(), 1);
}

#[test]
fn initial_snapshot_race_either_order() {
    let mut snapshot_last = Client::new();
    snapshot_last.frame("rotation", "101");
    snapshot_last.input(DriverInput::InitialRotations(Ok("100".into())));
    assert_eq!(snapshot_last.snapshot().model.rotation_count, 100);

    let mut live_last = Client::new();
    live_last.input(DriverInput::InitialRotations(Ok("100".into())));
    live_last.frame("rotation", "101");
    assert_eq!(live_last.snapshot().model.rotation_count, 101);
}
