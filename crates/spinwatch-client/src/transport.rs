//! HTTP transport for push channels.
//!
//! Provides [`ChannelHandle`], which owns a background task running one
//! Server-Sent Events connection with automatic reconnection. This is a thin
//! I/O layer: framing, subscriptions and backoff decisions stay in the
//! Sans-IO [`EventChannel`].

use std::time::Duration;

use futures_util::StreamExt;
use rand::Rng;
use reqwest::{
    StatusCode, Url,
    header::{ACCEPT, CACHE_CONTROL, CONTENT_TYPE, HeaderValue},
};
use tokio::sync::mpsc;

use crate::{ChannelConfig, ChannelEvent, EventChannel, TransportError};

const EVENT_STREAM_MIME: &str = "text/event-stream";
const LAST_EVENT_ID: &str = "Last-Event-ID";

/// Buffered events between the connection task and the consumer.
const EVENT_BUFFER: usize = 256;

/// Jitter applied to reconnect delays, as a fraction of the delay.
const RECONNECT_JITTER: f64 = 0.2;

/// Handle to a running push channel.
///
/// Events arrive on [`ChannelHandle::events`] in the order the channel
/// produced them. The receiver yields `None` once the channel has closed for
/// good (for example after a `204 No Content` answer).
pub struct ChannelHandle {
    /// Lifecycle signals and subscribed frames.
    pub events: mpsc::Receiver<ChannelEvent>,
    /// Abort handle to stop the connection task.
    abort_handle: tokio::task::AbortHandle,
}

impl ChannelHandle {
    /// Stop the connection task.
    pub fn stop(&self) {
        self.abort_handle.abort();
    }
}

impl Drop for ChannelHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Open a push channel to `endpoint`.
///
/// Returns immediately; connecting happens on a spawned task, which reports
/// `Opened` once the server accepts the stream. Must be called from within a
/// tokio runtime.
///
/// # Errors
///
/// [`TransportError::Unavailable`] if `endpoint` is not an absolute HTTP(S)
/// URL or the HTTP client cannot be built.
pub fn open(endpoint: &str, config: ChannelConfig) -> Result<ChannelHandle, TransportError> {
    let url = parse_endpoint(endpoint)?;
    let client = reqwest::Client::builder()
        .build()
        .map_err(|e| TransportError::Unavailable(format!("http client: {e}")))?;

    let (tx, rx) = mpsc::channel(EVENT_BUFFER);
    let channel = EventChannel::new(config);
    let task = tokio::spawn(run_channel(client, url, channel, tx));

    Ok(ChannelHandle { events: rx, abort_handle: task.abort_handle() })
}

/// Fetch `url` once and return the body as text.
///
/// # Errors
///
/// Returns an error if the URL is unusable, the request fails, the server
/// answers with a non-success status, or the body cannot be read.
pub async fn fetch_text(url: &str, timeout: Duration) -> Result<String, TransportError> {
    let url = parse_endpoint(url)?;
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| TransportError::Unavailable(format!("http client: {e}")))?;

    let response =
        client.get(url).send().await.map_err(|e| TransportError::Connection(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(TransportError::Status(status.as_u16()));
    }

    response.text().await.map_err(|e| TransportError::Stream(e.to_string()))
}

fn parse_endpoint(endpoint: &str) -> Result<Url, TransportError> {
    let url = Url::parse(endpoint)
        .map_err(|e| TransportError::Unavailable(format!("invalid endpoint {endpoint:?}: {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(TransportError::Unavailable(format!("unsupported scheme {other:?}"))),
    }
}

/// How a single connection ended.
enum Exit {
    /// Connection lost; reconnect after the backoff delay.
    Disconnected,
    /// Consumer dropped the receiver; stop the task.
    ReceiverGone,
}

/// Run the connect / read / reconnect loop until the channel closes.
async fn run_channel(
    client: reqwest::Client,
    url: Url,
    mut channel: EventChannel,
    tx: mpsc::Sender<ChannelEvent>,
) {
    loop {
        match connect(&client, &url, channel.last_event_id()).await {
            Ok(response) => {
                if tx.send(channel.handle_open()).await.is_err() {
                    return;
                }
                match pump(response, &mut channel, &tx).await {
                    Exit::Disconnected => tracing::info!(%url, "push channel lost"),
                    Exit::ReceiverGone => return,
                }
            },
            Err(e) if !e.is_retryable() => {
                tracing::warn!(%url, error = %e, "push channel closed permanently");
                let _ = tx.send(channel.handle_fatal()).await;
                return;
            },
            Err(e) => tracing::warn!(%url, error = %e, "push channel connect failed"),
        }

        if tx.send(channel.handle_disconnect()).await.is_err() {
            return;
        }

        let delay = jittered(channel.reconnect_delay());
        tracing::debug!(
            %url,
            delay_ms = delay.as_millis() as u64,
            attempt = channel.failed_attempts(),
            "scheduling reconnect"
        );
        tokio::time::sleep(delay).await;
    }
}

/// Issue the streaming GET and validate the response headers.
async fn connect(
    client: &reqwest::Client,
    url: &Url,
    last_event_id: Option<&str>,
) -> Result<reqwest::Response, TransportError> {
    let mut request = client
        .get(url.clone())
        .header(ACCEPT, EVENT_STREAM_MIME)
        .header(CACHE_CONTROL, "no-cache");

    if let Some(id) = last_event_id {
        match HeaderValue::from_str(id) {
            Ok(value) => request = request.header(LAST_EVENT_ID, value),
            Err(_) => tracing::debug!(id, "last event id not representable as header"),
        }
    }

    let response = request.send().await.map_err(|e| TransportError::Connection(e.to_string()))?;

    let status = response.status();
    if status == StatusCode::NO_CONTENT {
        return Err(TransportError::NoContent);
    }
    if !status.is_success() {
        return Err(TransportError::Status(status.as_u16()));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    if !content_type.starts_with(EVENT_STREAM_MIME) {
        return Err(TransportError::ContentType(content_type));
    }

    Ok(response)
}

/// Read body chunks into the channel until the stream ends.
async fn pump(
    response: reqwest::Response,
    channel: &mut EventChannel,
    tx: &mpsc::Sender<ChannelEvent>,
) -> Exit {
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => {
                tracing::warn!(error = %e, "push channel read failed");
                return Exit::Disconnected;
            },
        };

        for event in channel.handle_bytes(&chunk) {
            if tx.send(event).await.is_err() {
                return Exit::ReceiverGone;
            }
        }
    }

    Exit::Disconnected
}

fn jittered(delay: Duration) -> Duration {
    let factor = rand::thread_rng().gen_range(1.0 - RECONNECT_JITTER..=1.0 + RECONNECT_JITTER);
    delay.mul_f64(factor)
}
