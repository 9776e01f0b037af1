//! Client configuration.

/// Default path of the telemetry push channel.
pub const DEFAULT_EVENTS_PATH: &str = "/events";
/// Default path of the debug push channel.
pub const DEFAULT_DEBUG_PATH: &str = "/debug";
/// Default path of the one-shot rotation count.
pub const DEFAULT_INITIAL_PATH: &str = "/rotations";
/// Default number of lines kept in the debug pane.
pub const DEFAULT_DEBUG_CAPACITY: usize = 200;

/// Endpoints and presentation limits for one client session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Telemetry push channel URL.
    pub events_url: String,
    /// Debug push channel URL. `None` disables the debug channel.
    pub debug_url: Option<String>,
    /// One-shot initial rotation count URL.
    pub initial_rotations_url: String,
    /// Maximum lines kept in the debug pane.
    pub debug_capacity: usize,
}

impl ClientConfig {
    /// Default endpoints under `server` (for example `http://192.168.4.1`).
    pub fn from_server(server: &str) -> Self {
        let base = server.trim_end_matches('/');
        Self {
            events_url: join(base, DEFAULT_EVENTS_PATH),
            debug_url: Some(join(base, DEFAULT_DEBUG_PATH)),
            initial_rotations_url: join(base, DEFAULT_INITIAL_PATH),
            debug_capacity: DEFAULT_DEBUG_CAPACITY,
        }
    }

    /// Build from a server base URL and explicit paths.
    pub fn with_paths(
        server: &str,
        events_path: &str,
        debug_path: Option<&str>,
        initial_path: &str,
    ) -> Self {
        let base = server.trim_end_matches('/');
        Self {
            events_url: join(base, events_path),
            debug_url: debug_path.map(|path| join(base, path)),
            initial_rotations_url: join(base, initial_path),
            debug_capacity: DEFAULT_DEBUG_CAPACITY,
        }
    }

    /// Disable the debug channel.
    #[must_use]
    pub fn without_debug(mut self) -> Self {
        self.debug_url = None;
        self
    }
}

fn join(base: &str, path: &str) -> String {
    format!("{base}/{}", path.trim_start_matches('/'))
}
