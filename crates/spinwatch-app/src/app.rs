//! Application state machine.
//!
//! This module defines the [`App`] state machine, which manages the observable
//! state of the client completely decoupled from I/O and transport mechanics.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Folds telemetry into the view model through the [`StateReconciler`].
//! - Feeds telemetry channel lifecycle into the [`ConnectivityMonitor`].
//! - Keeps the bounded debug log and the debug pane toggle.
//! - Asks for a render after every observable change.

use spinwatch_client::ChannelId;

use crate::{
    AppAction, AppEvent, ClientConfig, Connectivity, ConnectivityMonitor, DebugLog, KeyInput,
    LifecycleSignal, StateReconciler, ViewModel, ViewSnapshot,
};

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct App {
    config: ClientConfig,
    reconciler: StateReconciler,
    monitor: ConnectivityMonitor,
    debug_log: DebugLog,
    /// Debug pane visible.
    show_debug: bool,
}

impl App {
    /// Create a new App for the given endpoints.
    pub fn new(config: ClientConfig) -> Self {
        let debug_log = DebugLog::new(config.debug_capacity);
        Self {
            config,
            reconciler: StateReconciler::new(),
            monitor: ConnectivityMonitor::new(),
            debug_log,
            show_debug: false,
        }
    }

    /// Actions that bring the client up: open channels, fetch the initial
    /// rotation count, and draw the default view.
    pub fn start(&self) -> Vec<AppAction> {
        let mut actions = vec![AppAction::OpenChannel {
            channel: ChannelId::Telemetry,
            endpoint: self.config.events_url.clone(),
        }];
        if let Some(debug_url) = &self.config.debug_url {
            actions.push(AppAction::OpenChannel {
                channel: ChannelId::Debug,
                endpoint: debug_url.clone(),
            });
        }
        actions.push(AppAction::FetchInitialRotations {
            url: self.config.initial_rotations_url.clone(),
        });
        actions.push(AppAction::Render);
        actions
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Tick => vec![],
            AppEvent::Resize(..) => vec![AppAction::Render],
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::ChannelOpened => self.observe(LifecycleSignal::Opened),
            AppEvent::ChannelError { is_open } => self.observe(LifecycleSignal::Error { is_open }),
            AppEvent::Telemetry(telemetry) => {
                if self.reconciler.apply(telemetry) {
                    vec![AppAction::Render]
                } else {
                    vec![]
                }
            },
            AppEvent::DebugLine(line) => {
                self.debug_log.push(line);
                if self.show_debug { vec![AppAction::Render] } else { vec![] }
            },
        }
    }

    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Esc | KeyInput::Char('q') => self.quit(),
            KeyInput::Tab | KeyInput::Char('d') => {
                self.show_debug = !self.show_debug;
                vec![AppAction::Render]
            },
            KeyInput::Char('c') => {
                self.debug_log.clear();
                if self.show_debug { vec![AppAction::Render] } else { vec![] }
            },
            KeyInput::Char(_) => vec![],
        }
    }

    fn observe(&mut self, signal: LifecycleSignal) -> Vec<AppAction> {
        match self.monitor.observe(signal) {
            Some(connectivity) => {
                self.reconciler.set_connectivity(connectivity);
                vec![AppAction::Render]
            },
            None => vec![],
        }
    }

    /// Quit the application.
    pub fn quit(&self) -> Vec<AppAction> {
        vec![AppAction::Quit]
    }

    /// Owned view for the renderer.
    pub fn snapshot(&self) -> ViewSnapshot {
        let mut snapshot = ViewSnapshot::of(self.reconciler.model());
        snapshot.show_debug = self.show_debug;
        if self.show_debug {
            snapshot.debug_lines = self.debug_log.lines().map(str::to_owned).collect();
        }
        snapshot
    }

    /// Current view model.
    pub fn view_model(&self) -> &ViewModel {
        self.reconciler.model()
    }

    /// Current connectivity.
    pub fn connectivity(&self) -> Connectivity {
        self.monitor.current()
    }

    /// Debug log.
    pub fn debug_log(&self) -> &DebugLog {
        &self.debug_log
    }

    /// Debug pane visible.
    pub fn show_debug(&self) -> bool {
        self.show_debug
    }

    /// Endpoints this App was created with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}
