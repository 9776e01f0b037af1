//! Incremental Server-Sent Events parser.
//!
//! Implements the `text/event-stream` interpretation rules of the EventSource
//! model: lines end in CR, LF or CRLF; a blank line dispatches the pending
//! event; `event`, `data`, `id` and `retry` are the only meaningful fields;
//! lines starting with `:` are comments.
//!
//! The parser is fed arbitrary byte chunks as they arrive from the network.
//! Output does not depend on how the stream is split into chunks.

/// Event type used when a frame carries no `event:` field.
pub const DEFAULT_EVENT_TYPE: &str = "message";

/// Default limit for a single line, in bytes.
pub const DEFAULT_MAX_LINE_BYTES: usize = 64 * 1024;

const BOM: char = '\u{feff}';

/// One dispatched event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    /// Event type (`message` when the frame had no `event:` field).
    pub event_type: String,
    /// Payload. Multiple `data:` lines are joined with `\n`.
    pub data: String,
    /// Last event ID in effect when the event was dispatched.
    pub last_event_id: String,
}

/// Items produced while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseItem {
    /// A complete event was dispatched.
    Event(SseEvent),
    /// Server asked for a new reconnection delay, in milliseconds.
    Retry(u64),
    /// A line exceeded the configured limit and was discarded.
    LineTooLong {
        /// Configured limit in bytes.
        limit: usize,
    },
}

/// Streaming `text/event-stream` parser.
///
/// Holds the partial line and the event being assembled between calls to
/// [`SseParser::push`]. The last event ID survives [`SseParser::reset`] so it
/// can be replayed as `Last-Event-ID` after a reconnect.
#[derive(Debug, Clone)]
pub struct SseParser {
    line: Vec<u8>,
    /// Previous chunk ended in CR; a leading LF belongs to the same line end.
    after_cr: bool,
    /// Current line went over the limit and is being skipped to its end.
    discarding: bool,
    /// No line has been completed since the stream (re)started.
    at_stream_start: bool,
    event_type: String,
    data: String,
    last_event_id: String,
    max_line_bytes: usize,
}

impl Default for SseParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SseParser {
    /// Create a parser with the default line limit.
    pub fn new() -> Self {
        Self::with_max_line_bytes(DEFAULT_MAX_LINE_BYTES)
    }

    /// Create a parser that discards lines longer than `max_line_bytes`.
    pub fn with_max_line_bytes(max_line_bytes: usize) -> Self {
        Self {
            line: Vec::new(),
            after_cr: false,
            discarding: false,
            at_stream_start: true,
            event_type: String::new(),
            data: String::new(),
            last_event_id: String::new(),
            max_line_bytes,
        }
    }

    /// Last event ID seen on the stream. Empty if the server never sent one.
    pub fn last_event_id(&self) -> &str {
        &self.last_event_id
    }

    /// Forget partial input before a new connection. Keeps the last event ID.
    pub fn reset(&mut self) {
        self.line.clear();
        self.after_cr = false;
        self.discarding = false;
        self.at_stream_start = true;
        self.event_type.clear();
        self.data.clear();
    }

    /// Feed a chunk of bytes and collect everything it completes.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseItem> {
        let mut items = Vec::new();

        for &byte in chunk {
            if self.after_cr {
                self.after_cr = false;
                if byte == b'\n' {
                    continue;
                }
            }

            match byte {
                b'\r' => {
                    self.after_cr = true;
                    self.end_line(&mut items);
                },
                b'\n' => self.end_line(&mut items),
                _ if self.discarding => {},
                _ if self.line.len() >= self.max_line_bytes => {
                    self.line.clear();
                    self.discarding = true;
                    items.push(SseItem::LineTooLong { limit: self.max_line_bytes });
                },
                _ => self.line.push(byte),
            }
        }

        items
    }

    fn end_line(&mut self, items: &mut Vec<SseItem>) {
        if self.discarding {
            self.discarding = false;
            self.line.clear();
            return;
        }

        let bytes = std::mem::take(&mut self.line);
        let decoded = String::from_utf8_lossy(&bytes);
        let mut line: &str = &decoded;
        if self.at_stream_start {
            self.at_stream_start = false;
            line = line.strip_prefix(BOM).unwrap_or(line);
        }

        self.process_line(line, items);
    }

    fn process_line(&mut self, line: &str, items: &mut Vec<SseItem>) {
        if line.is_empty() {
            self.dispatch(items);
            return;
        }
        if line.starts_with(':') {
            return;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        match field {
            "event" => value.clone_into(&mut self.event_type),
            "data" => {
                self.data.push_str(value);
                self.data.push('\n');
            },
            "id" => {
                if !value.contains('\0') {
                    value.clone_into(&mut self.last_event_id);
                }
            },
            "retry" => {
                if !value.is_empty()
                    && value.bytes().all(|b| b.is_ascii_digit())
                    && let Ok(ms) = value.parse()
                {
                    items.push(SseItem::Retry(ms));
                }
            },
            _ => {},
        }
    }

    fn dispatch(&mut self, items: &mut Vec<SseItem>) {
        let event_type = std::mem::take(&mut self.event_type);
        let mut data = std::mem::take(&mut self.data);
        if data.is_empty() {
            return;
        }
        if data.ends_with('\n') {
            data.pop();
        }

        let event_type =
            if event_type.is_empty() { DEFAULT_EVENT_TYPE.to_owned() } else { event_type };
        items.push(SseItem::Event(SseEvent {
            event_type,
            data,
            last_event_id: self.last_event_id.clone(),
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(items: &[SseItem]) -> Vec<(&str, &str)> {
        items
            .iter()
            .filter_map(|item| match item {
                SseItem::Event(e) => Some((e.event_type.as_str(), e.data.as_str())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn named_event_dispatches_on_blank_line() {
        let mut parser = SseParser::new();
        let items = parser.push(b"event: rotation\ndata: 12\n\n");
        assert_eq!(events(&items), vec![("rotation", "12")]);
    }

    #[test]
    fn nothing_dispatched_without_blank_line() {
        let mut parser = SseParser::new();
        assert!(parser.push(b"event: rotation\ndata: 12\n").is_empty());
        assert_eq!(events(&parser.push(b"\n")), vec![("rotation", "12")]);
    }

    #[test]
    fn unnamed_event_is_message() {
        let mut parser = SseParser::new();
        let items = parser.push(b"data: hello\n\n");
        assert_eq!(events(&items), vec![("message", "hello")]);
    }

    #[test]
    fn multi_line_data_is_joined() {
        let mut parser = SseParser::new();
        let items = parser.push(b"event: debug\ndata: a\ndata:b\ndata\n\n");
        assert_eq!(events(&items), vec![("debug", "a\nb\n")]);
    }

    #[test]
    fn empty_data_buffer_is_not_dispatched() {
        let mut parser = SseParser::new();
        let items = parser.push(b"event: rotation\n\ndata: 1\n\n");
        // Event type from the dropped frame must not leak into the next one.
        assert_eq!(events(&items), vec![("message", "1")]);
    }

    #[test]
    fn comments_are_ignored() {
        let mut parser = SseParser::new();
        let items = parser.push(b": keepalive\n\n:another\nevent: speed\ndata: 1,2,3\n\n");
        assert_eq!(events(&items), vec![("speed", "1,2,3")]);
    }

    #[test]
    fn crlf_and_cr_line_endings() {
        let mut parser = SseParser::new();
        let items = parser.push(b"event: state\r\ndata: 1,450\r\n\r\nevent: rotation\rdata: 3\r\r");
        assert_eq!(events(&items), vec![("state", "1,450"), ("rotation", "3")]);
    }

    #[test]
    fn crlf_split_across_chunks() {
        let mut parser = SseParser::new();
        let mut items = parser.push(b"data: 5\r");
        items.extend(parser.push(b"\n\r"));
        items.extend(parser.push(b"\n"));
        assert_eq!(events(&items), vec![("message", "5")]);
    }

    #[test]
    fn id_is_tracked_and_survives_reset() {
        let mut parser = SseParser::new();
        let items = parser.push(b"id: 41\ndata: x\n\n");
        match items.as_slice() {
            [SseItem::Event(event)] => assert_eq!(event.last_event_id, "41"),
            other => panic!("unexpected items: {other:?}"),
        }

        parser.reset();
        assert_eq!(parser.last_event_id(), "41");
    }

    #[test]
    fn id_with_nul_is_ignored() {
        let mut parser = SseParser::new();
        let _ = parser.push(b"id: 1\n\nid: 2\0\n\n");
        assert_eq!(parser.last_event_id(), "1");
    }

    #[test]
    fn retry_requires_digits() {
        let mut parser = SseParser::new();
        let items = parser.push(b"retry: 1500\nretry: soon\nretry:\nretry: 1.5\n");
        assert_eq!(items, vec![SseItem::Retry(1500)]);
    }

    #[test]
    fn leading_bom_is_stripped_once() {
        let mut parser = SseParser::new();
        let mut input = "\u{feff}event: rotation\ndata: 9\n\n".as_bytes().to_vec();
        input.extend_from_slice("\u{feff}data: 10\n\n".as_bytes());
        let items = parser.push(&input);
        // The second BOM is not at stream start so its line is an unknown field.
        assert_eq!(events(&items), vec![("rotation", "9")]);
    }

    #[test]
    fn oversized_line_is_discarded() {
        let mut parser = SseParser::with_max_line_bytes(8);
        let items = parser.push(b"data: 0123456789\ndata: ok\n\n");
        assert_eq!(items.first(), Some(&SseItem::LineTooLong { limit: 8 }));
        assert_eq!(events(&items), vec![("message", "ok")]);
    }

    #[test]
    fn reset_drops_partial_event() {
        let mut parser = SseParser::new();
        let _ = parser.push(b"event: rotation\ndata: 1");
        parser.reset();
        assert_eq!(events(&parser.push(b"data: 2\n\n")), vec![("message", "2")]);
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let mut parser = SseParser::new();
        let items = parser.push(b"data: \xff\n\n");
        assert_eq!(events(&items), vec![("message", "\u{fffd}")]);
    }
}
