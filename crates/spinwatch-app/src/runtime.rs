//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: observable state machine
//! - [`Bridge`]: decoder from driver input to App events
//! - [`Driver`]: Platform-specific I/O

use crate::{App, AppAction, AppEvent, Bridge, ClientConfig, Driver, DriverInput};

/// Generic runtime that orchestrates App, Bridge, and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
pub struct Runtime<D>
where
    D: Driver,
{
    driver: D,
    app: App,
    bridge: Bridge,
}

impl<D> Runtime<D>
where
    D: Driver,
{
    /// Create a new runtime with the given driver and endpoints.
    pub fn new(driver: D, config: ClientConfig) -> Self {
        Self { driver, app: App::new(config), bridge: Bridge::new() }
    }

    /// Run the main event loop.
    ///
    /// 1. Opens the push channels and requests the initial snapshot
    /// 2. Renders the default view
    /// 3. Feeds every driver input through the Bridge and App, one at a time
    ///    and in arrival order, until the input ends or the user quits
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<Self, D::Error> {
        let actions = self.app.start();
        if self.process_actions(actions)? {
            self.driver.stop();
            return Ok(self);
        }

        while let Some(input) = self.driver.next_input().await? {
            if self.process_input(input)? {
                break;
            }
        }

        self.driver.stop();
        Ok(self)
    }

    /// Process one driver input.
    ///
    /// Returns `true` if the application should quit.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn process_input(&mut self, input: DriverInput) -> Result<bool, D::Error> {
        for event in self.bridge.handle_input(input) {
            let actions = self.app.handle(event);
            if self.process_actions(actions)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Execute actions returned by the App.
    ///
    /// Returns `true` if should quit.
    fn process_actions(&mut self, actions: Vec<AppAction>) -> Result<bool, D::Error> {
        for action in actions {
            match action {
                AppAction::Render => self.driver.render(&self.app.snapshot())?,
                AppAction::Quit => return Ok(true),
                AppAction::OpenChannel { channel, endpoint } => {
                    if let Err(error) = self.driver.open_channel(channel, &endpoint) {
                        tracing::warn!(%channel, %endpoint, %error, "failed to open channel");
                        let line = format!("[client] {channel} channel unavailable: {error}");
                        let follow_up = self.app.handle(AppEvent::DebugLine(line));
                        if self.process_actions(follow_up)? {
                            return Ok(true);
                        }
                    }
                },
                AppAction::FetchInitialRotations { url } => {
                    self.driver.fetch_initial_rotations(&url);
                },
            }
        }
        Ok(false)
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a reference to the Bridge
    pub fn bridge(&self) -> &Bridge {
        &self.bridge
    }

    /// Get a reference to the Driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Get a mutable reference to the Driver
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}
