//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering. Push channels and the initial
//! fetch run on spawned tasks and report back through one mpsc queue.

use std::{
    io::{self, Stdout, stdout},
    time::Duration,
};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use spinwatch_app::{ChannelId, Driver, DriverInput, KeyInput, TransportError, ViewSnapshot};
use spinwatch_client::{ChannelConfig, transport};
use thiserror::Error;
use tokio::{sync::mpsc, task::AbortHandle, time::MissedTickBehavior};

use crate::ui;

/// Queued inputs from background tasks.
const INPUT_BUFFER: usize = 256;

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Transport settings for the terminal driver.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Telemetry channel settings.
    pub telemetry: ChannelConfig,
    /// Debug channel settings.
    pub debug: ChannelConfig,
    /// Timeout for the initial rotation count fetch.
    pub fetch_timeout: Duration,
    /// Interval between ticks.
    pub tick_interval: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            telemetry: ChannelConfig::telemetry(),
            debug: ChannelConfig::debug(),
            fetch_timeout: Duration::from_secs(5),
            tick_interval: Duration::from_millis(250),
        }
    }
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Handles terminal I/O (crossterm), rendering (ratatui), and the HTTP push
/// channels (reqwest).
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    tick: tokio::time::Interval,
    config: DriverConfig,
    inputs_tx: mpsc::Sender<DriverInput>,
    inputs_rx: mpsc::Receiver<DriverInput>,
    tasks: Vec<AbortHandle>,
}

impl TerminalDriver {
    /// Create a new terminal driver. Must be called inside a tokio runtime.
    pub fn new(config: DriverConfig) -> Result<Self, TerminalError> {
        let terminal = setup_or_restore(
            || {
                enable_raw_mode()?;
                stdout().execute(EnterAlternateScreen)?;
                Terminal::new(CrosstermBackend::new(stdout()))
            },
            restore_terminal,
        )?;
        let mut tick = tokio::time::interval(config.tick_interval);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let (inputs_tx, inputs_rx) = mpsc::channel(INPUT_BUFFER);

        Ok(Self {
            terminal,
            event_stream: EventStream::new(),
            tick,
            config,
            inputs_tx,
            inputs_rx,
            tasks: Vec::new(),
        })
    }

    /// Convert a crossterm key to `KeyInput`. Ctrl-C quits like Esc.
    fn convert_key(code: KeyCode, modifiers: KeyModifiers) -> Option<KeyInput> {
        match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(KeyInput::Esc),
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Tab => Some(KeyInput::Tab),
            KeyCode::Esc => Some(KeyInput::Esc),
            _ => None,
        }
    }

    fn convert_event(event: Event) -> Option<DriverInput> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                Self::convert_key(key.code, key.modifiers).map(DriverInput::Key)
            },
            Event::Resize(cols, rows) => Some(DriverInput::Resize(cols, rows)),
            _ => None,
        }
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn next_input(&mut self) -> Result<Option<DriverInput>, Self::Error> {
        loop {
            tokio::select! {
                biased;

                // Terminal events
                maybe_event = self.event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => {
                            if let Some(input) = Self::convert_event(event) {
                                return Ok(Some(input));
                            }
                        },
                        Some(Err(e)) => return Err(TerminalError::Io(e)),
                        None => return Ok(None),
                    }
                }

                // Channel events and fetch results
                Some(input) = self.inputs_rx.recv() => return Ok(Some(input)),

                _ = self.tick.tick() => return Ok(Some(DriverInput::Tick)),
            }
        }
    }

    fn open_channel(&mut self, channel: ChannelId, endpoint: &str) -> Result<(), TransportError> {
        let config = match channel {
            ChannelId::Telemetry => self.config.telemetry.clone(),
            ChannelId::Debug => self.config.debug.clone(),
        };
        let mut handle = transport::open(endpoint, config)?;
        let tx = self.inputs_tx.clone();

        let forwarder = tokio::spawn(async move {
            while let Some(event) = handle.events.recv().await {
                if tx.send(DriverInput::Channel { channel, event }).await.is_err() {
                    break;
                }
            }
            tracing::info!(%channel, "channel closed");
        });
        self.tasks.push(forwarder.abort_handle());
        Ok(())
    }

    fn fetch_initial_rotations(&mut self, url: &str) {
        let url = url.to_owned();
        let timeout = self.config.fetch_timeout;
        let tx = self.inputs_tx.clone();

        let fetch = tokio::spawn(async move {
            let result = transport::fetch_text(&url, timeout).await;
            let _ = tx.send(DriverInput::InitialRotations(result)).await;
        });
        self.tasks.push(fetch.abort_handle());
    }

    fn render(&mut self, snapshot: &ViewSnapshot) -> Result<(), Self::Error> {
        self.terminal.draw(|frame| ui::render(frame, snapshot))?;
        Ok(())
    }

    fn stop(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.stop();
        restore_terminal();
    }
}

/// Run terminal setup, calling `restore` if any step fails. A driver that
/// was never built has no `Drop` to leave raw mode for it.
fn setup_or_restore<T>(
    setup: impl FnOnce() -> io::Result<T>,
    restore: impl FnOnce(),
) -> io::Result<T> {
    setup().inspect_err(|_| restore())
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = stdout().execute(LeaveAlternateScreen);
}
