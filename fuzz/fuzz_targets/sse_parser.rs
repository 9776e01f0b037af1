//! Fuzz target for the Server-Sent Events parser
//!
//! # Strategy
//!
//! - Arbitrary bytes, including invalid UTF-8, stray CRs and BOMs
//! - The same bytes split at arbitrary chunk boundaries
//!
//! # Invariants
//!
//! - Parsing never panics
//! - Output does not depend on how the stream is chunked
//! - The last event ID never contains a NUL

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use spinwatch_proto::SseParser;

#[derive(Debug, Arbitrary)]
struct Input {
    bytes: Vec<u8>,
    cuts: Vec<u16>,
    max_line: u8,
}

fuzz_target!(|input: Input| {
    let max_line = usize::from(input.max_line).max(1) * 16;

    let mut whole = SseParser::with_max_line_bytes(max_line);
    let expected = whole.push(&input.bytes);

    let mut cuts: Vec<usize> = input
        .cuts
        .iter()
        .map(|c| usize::from(*c) % (input.bytes.len() + 1))
        .collect();
    cuts.sort_unstable();
    cuts.dedup();

    let mut chunked = SseParser::with_max_line_bytes(max_line);
    let mut actual = Vec::new();
    let mut start = 0;
    for cut in cuts.into_iter().chain(std::iter::once(input.bytes.len())) {
        actual.extend(chunked.push(&input.bytes[start..cut]));
        start = cut;
    }

    assert_eq!(expected, actual);
    assert_eq!(whole.last_event_id(), chunked.last_event_id());
    assert!(!whole.last_event_id().contains('\0'));
});
