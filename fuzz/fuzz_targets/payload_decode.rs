//! Fuzz target for the telemetry payload decoders
//!
//! Feeds arbitrary text to the `rotation`, `speed` and `state` decoders.
//!
//! # Invariants
//!
//! - Decoding never panics
//! - A decoded speed field is finite and non-negative
//! - A decoded state is rotating only for the literal flag `1`

#![no_main]

use libfuzzer_sys::fuzz_target;
use spinwatch_proto::{decode_rotation, decode_speed, decode_state};

fuzz_target!(|data: &str| {
    let _ = decode_rotation(data);

    if let Ok(sample) = decode_speed(data) {
        for value in [sample.current, sample.max, sample.average].into_iter().flatten() {
            assert!(value.is_finite() && value >= 0.0, "unusable speed {value} from {data:?}");
        }
    }

    if let Ok(state) = decode_state(data) {
        let flag = data.split(',').next().map(str::trim);
        assert_eq!(state.is_rotating, flag == Some("1"), "flag mismatch for {data:?}");
    }
});
