//! End-to-end runtime scenarios.
//!
//! Each test scripts a session with [`SimChannel`]s, runs the real
//! [`Runtime`] over a [`SimDriver`], and checks what was rendered.

use spinwatch_app::{
    ChannelId, ClientConfig, Connectivity, DriverInput, KeyInput, Runtime, TransportError,
};
use spinwatch_harness::{InvariantRegistry, SimChannel, SimDriver, SimDriverError};

const SERVER: &str = "http://rig";

fn config() -> ClientConfig {
    ClientConfig::from_server(SERVER)
}

fn driver() -> SimDriver {
    SimDriver::new().with_invariants(InvariantRegistry::standard())
}

async fn run(driver: SimDriver, config: ClientConfig) -> Runtime<SimDriver> {
    Runtime::new(driver, config).run().await.expect("runtime completes")
}

#[tokio::test]
async fn startup_renders_defaults_and_opens_channels() {
    let runtime = run(driver(), config()).await;
    let driver = runtime.driver();

    assert_eq!(
        driver.opened_channels(),
        [
            (ChannelId::Telemetry, "http://rig/events".to_string()),
            (ChannelId::Debug, "http://rig/debug".to_string()),
        ]
    );
    assert_eq!(driver.fetches(), ["http://rig/rotations".to_string()]);

    let first = &driver.history().renders()[0];
    assert_eq!(first.model.rotation_count, 0);
    assert_eq!(first.model.connectivity, Connectivity::Unknown);
    assert!(!first.show_stopped_emphasis);
    assert!(driver.is_stopped());
}

#[tokio::test]
async fn rotation_stream_renders_each_count() {
    let mut telemetry = SimChannel::telemetry(1);
    let mut driver = driver();
    driver.inject_all(telemetry.open());
    for count in [10, 11, 12] {
        driver.inject_all(telemetry.send("rotation", &count.to_string()));
    }

    let runtime = run(driver, config()).await;
    let counts: Vec<u64> =
        runtime.driver().history().renders().iter().map(|r| r.model.rotation_count).collect();

    assert!(counts.ends_with(&[10, 11, 12]));
    assert_eq!(runtime.app().view_model().connectivity, Connectivity::Online);
}

#[tokio::test]
async fn partial_speed_frame_keeps_other_fields() {
    let mut telemetry = SimChannel::telemetry(2);
    let mut driver = driver();
    driver.inject_all(telemetry.open());
    driver.inject_all(telemetry.send("speed", "1.25,9.5,3"));
    driver.inject_all(telemetry.send("speed", "2,,"));

    let runtime = run(driver, config()).await;
    let speed = runtime.app().view_model().speed;

    assert_eq!(speed.current, 2.0);
    assert_eq!(speed.max, 9.5);
    assert_eq!(speed.average, 3.0);
}

#[tokio::test]
async fn stall_shows_emphasis_then_clears() {
    let mut telemetry = SimChannel::telemetry(3);
    let mut driver = driver();
    driver.inject_all(telemetry.open());
    driver.inject_all(telemetry.send("state", "0,2500"));

    let runtime = run(driver, config()).await;
    assert!(runtime.driver().last_render().expect("rendered").show_stopped_emphasis);

    let mut telemetry = SimChannel::telemetry(3);
    let mut driver = self::driver();
    driver.inject_all(telemetry.open());
    driver.inject_all(telemetry.send("state", "0,2500"));
    driver.inject_all(telemetry.send("state", "1,0"));

    let runtime = run(driver, config()).await;
    assert!(!runtime.driver().last_render().expect("rendered").show_stopped_emphasis);
}

#[tokio::test]
async fn malformed_frame_is_ignored() {
    let mut telemetry = SimChannel::telemetry(4);
    let mut driver = driver();
    driver.inject_all(telemetry.open());
    driver.inject_all(telemetry.send("rotation", "7"));
    driver.inject_all(telemetry.send("rotation", "7x"));
    driver.inject_all(telemetry.send("state", "1"));

    let runtime = run(driver, config()).await;
    assert_eq!(runtime.app().view_model().rotation_count, 7);
    assert_eq!(runtime.bridge().dropped_frames(), 2);
    assert_eq!(runtime.app().debug_log().len(), 2);
}

#[tokio::test]
async fn connection_loss_and_recovery() {
    let mut telemetry = SimChannel::telemetry(5);
    let mut driver = driver();
    driver.inject_all(telemetry.open());
    driver.inject_all(telemetry.send_oversized());
    driver.inject_all(telemetry.lose());
    driver.inject_all(telemetry.lose());
    driver.inject_all(telemetry.open());

    let runtime = run(driver, config()).await;
    let connectivity: Vec<Connectivity> =
        runtime.driver().history().renders().iter().map(|r| r.model.connectivity).collect();

    assert_eq!(
        connectivity,
        [Connectivity::Unknown, Connectivity::Online, Connectivity::Offline, Connectivity::Online]
    );
}

#[tokio::test]
async fn initial_snapshot_then_live_count() {
    let driver = driver().with_initial_rotations("http://rig/rotations", Ok("100".into()));
    let runtime = run(driver, config()).await;
    assert_eq!(runtime.app().view_model().rotation_count, 100);

    let mut telemetry = SimChannel::telemetry(6);
    let mut driver = self::driver();
    driver.inject_all(telemetry.open());
    driver.inject_all(telemetry.send("rotation", "101"));
    let driver = driver.with_initial_rotations("http://rig/rotations", Ok("100".into()));

    // The fetch answer lands behind the already queued live frame.
    let runtime = run(driver, config()).await;
    assert_eq!(runtime.app().view_model().rotation_count, 100);
}

#[tokio::test]
async fn initial_snapshot_failure_is_not_fatal() {
    let driver =
        driver().with_initial_rotations("http://rig/rotations", Err(TransportError::Status(404)));
    let runtime = run(driver, config()).await;

    assert_eq!(runtime.app().view_model().rotation_count, 0);
    assert_eq!(runtime.app().debug_log().len(), 1);
}

#[tokio::test]
async fn debug_channel_never_moves_connectivity() {
    let mut debug = SimChannel::debug(7);
    let mut driver = driver();
    driver.inject_all(debug.open());
    driver.inject_all(debug.send("debug", "boot ok"));
    driver.inject_all(debug.lose());

    let runtime = run(driver, config()).await;
    assert_eq!(runtime.app().view_model().connectivity, Connectivity::Unknown);
    assert!(runtime.app().debug_log().lines().any(|line| line == "boot ok"));
}

#[tokio::test]
async fn debug_pane_toggle_shows_lines() {
    let mut debug = SimChannel::debug(8);
    let mut driver = driver();
    driver.inject_all(debug.open());
    driver.inject_all(debug.send("debug", "motor warm"));
    driver.inject(DriverInput::Key(KeyInput::Char('d')));

    let runtime = run(driver, config()).await;
    let last = runtime.driver().last_render().expect("rendered");
    assert!(last.show_debug);
    assert!(last.debug_lines.iter().any(|line| line == "motor warm"));
}

#[tokio::test]
async fn quit_stops_before_remaining_input() {
    let mut telemetry = SimChannel::telemetry(9);
    let mut driver = driver();
    driver.inject_all(telemetry.open());
    driver.inject(DriverInput::Key(KeyInput::Char('q')));
    driver.inject_all(telemetry.send("rotation", "5"));

    let runtime = run(driver, config()).await;
    assert_eq!(runtime.app().view_model().rotation_count, 0);
    assert!(runtime.driver().has_pending());
    assert!(runtime.driver().is_stopped());
}

#[tokio::test]
async fn unavailable_debug_endpoint_degrades() {
    let driver = driver()
        .with_failing_endpoint("http://rig/debug", TransportError::Unavailable("bad url".into()));
    let runtime = run(driver, config()).await;

    assert_eq!(runtime.driver().opened_channels().len(), 1);
    assert_eq!(runtime.app().debug_log().len(), 1);
}

#[tokio::test]
async fn unavailable_telemetry_shows_snapshot_only() {
    let driver = driver()
        .with_failing_endpoint("http://rig/events", TransportError::Unavailable("no client".into()))
        .with_initial_rotations("http://rig/rotations", Ok("77".into()));
    let runtime = run(driver, config()).await;
    let driver = runtime.driver();

    assert_eq!(driver.opened_channels(), [(ChannelId::Debug, "http://rig/debug".to_string())]);

    let last = driver.last_render().expect("rendered");
    assert_eq!(last.model.rotation_count, 77);
    assert_eq!(last.model.connectivity, Connectivity::Unknown);
}

#[tokio::test]
async fn render_failure_surfaces() {
    let driver = SimDriver::new().with_failing_render();
    let result = Runtime::new(driver, config()).run().await;
    assert!(matches!(result, Err(SimDriverError::Render(_))));
}
