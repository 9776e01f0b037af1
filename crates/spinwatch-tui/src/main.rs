//! spinwatch entry point.

use std::{fs::File, path::PathBuf, sync::Mutex, time::Duration};

use clap::Parser;
use spinwatch_app::{DEFAULT_DEBUG_PATH, DEFAULT_EVENTS_PATH, DEFAULT_INITIAL_PATH};
use spinwatch_client::ChannelConfig;
use spinwatch_tui::{ClientConfig, DriverConfig, Runtime, TerminalDriver};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Live dashboard for a rotating-mechanism telemetry server
#[derive(Parser, Debug)]
#[command(name = "spinwatch")]
#[command(about = "Terminal dashboard for rotation, speed and stall telemetry")]
#[command(version)]
struct Args {
    /// Base URL of the telemetry server
    #[arg(short, long, env = "SPINWATCH_SERVER", default_value = "http://192.168.4.1")]
    server: String,

    /// Path of the telemetry event stream
    #[arg(long, default_value = DEFAULT_EVENTS_PATH)]
    events_path: String,

    /// Path of the debug event stream
    #[arg(long, default_value = DEFAULT_DEBUG_PATH)]
    debug_path: String,

    /// Do not open the debug event stream
    #[arg(long)]
    no_debug: bool,

    /// Path of the one-shot rotation count
    #[arg(long, default_value = DEFAULT_INITIAL_PATH)]
    initial_path: String,

    /// Base reconnection delay in milliseconds
    #[arg(long, default_value = "3000")]
    retry_ms: u64,

    /// Upper bound for the reconnection delay in milliseconds
    #[arg(long, default_value = "30000")]
    max_backoff_ms: u64,

    /// Lines kept in the debug pane
    #[arg(long, default_value = "200")]
    debug_lines: usize,

    /// Write logs to this file (the terminal is owned by the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
        let file = File::create(path)?;
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(filter)
            .init();
    }

    tracing::info!(server = %args.server, "spinwatch starting");

    let debug_path = (!args.no_debug).then_some(args.debug_path.as_str());
    let mut config =
        ClientConfig::with_paths(&args.server, &args.events_path, debug_path, &args.initial_path);
    config.debug_capacity = args.debug_lines;

    let retry = Duration::from_millis(args.retry_ms);
    let max_backoff = Duration::from_millis(args.max_backoff_ms);
    let driver_config = DriverConfig {
        telemetry: ChannelConfig::telemetry().with_backoff(retry, max_backoff),
        debug: ChannelConfig::debug().with_backoff(retry, max_backoff),
        ..DriverConfig::default()
    };

    let driver = TerminalDriver::new(driver_config)?;
    Runtime::new(driver, config).run().await?;

    tracing::info!("spinwatch stopped");
    Ok(())
}
