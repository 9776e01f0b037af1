//! Payload decoders, one per telemetry event type.
//!
//! Payloads are short comma-separated text records. Every decoder is total:
//! it returns a typed value or a [`DecodeError`], never panics, and never
//! produces a non-finite number.

use crate::{DecodeError, EventKind, Result};

/// Speed snapshot decoded from a `speed` frame.
///
/// Each field is `None` when the wire field was missing or unusable, which
/// the reconciler treats as "leave the previous value alone".
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpeedSample {
    /// Instantaneous speed.
    pub current: Option<f64>,
    /// Maximum speed as tracked by the server.
    pub max: Option<f64>,
    /// Running average speed.
    pub average: Option<f64>,
}

impl SpeedSample {
    /// True if no field carries an update.
    pub fn is_empty(&self) -> bool {
        self.current.is_none() && self.max.is_none() && self.average.is_none()
    }
}

/// Rotating flag and stall duration decoded from a `state` frame.
///
/// The two fields are one value: they are decoded together and must be
/// applied together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RotationState {
    /// Mechanism is currently turning.
    pub is_rotating: bool,
    /// Milliseconds since movement was last detected.
    pub ms_since_last_movement: u64,
}

const SPEED_FIELDS: usize = 3;
const STATE_FIELDS: usize = 2;

/// Decode a `rotation` payload: the cumulative count as decimal text.
///
/// Surrounding ASCII whitespace is tolerated. Signs, fractions and anything
/// else non-numeric are rejected.
pub fn decode_rotation(payload: &str) -> Result<u64> {
    let text = payload.trim();
    if text.is_empty() {
        return Err(DecodeError::Empty { kind: EventKind::Rotation });
    }
    parse_unsigned(EventKind::Rotation, text)
}

/// Decode a `speed` payload: `"<current>,<max>,<average>"`.
///
/// Missing trailing fields, empty fields, and fields that are not finite
/// non-negative decimals decode to `None`. More than three fields, or no
/// usable field at all, rejects the frame.
pub fn decode_speed(payload: &str) -> Result<SpeedSample> {
    if payload.trim().is_empty() {
        return Err(DecodeError::Empty { kind: EventKind::Speed });
    }

    let fields: Vec<&str> = payload.split(',').collect();
    if fields.len() > SPEED_FIELDS {
        return Err(DecodeError::FieldCount {
            kind: EventKind::Speed,
            expected: SPEED_FIELDS,
            found: fields.len(),
        });
    }

    let field = |index: usize| fields.get(index).and_then(|f| parse_speed_field(f));
    let sample = SpeedSample { current: field(0), max: field(1), average: field(2) };

    if sample.is_empty() {
        return Err(DecodeError::NoUsableField { kind: EventKind::Speed });
    }
    Ok(sample)
}

/// Decode a `state` payload: `"<0|1>,<ms>"`.
///
/// The flag is rotating only for the literal `1`; any other text means not
/// rotating. The duration must be an unsigned integer, otherwise the whole
/// frame is rejected so the pair is never half-applied.
pub fn decode_state(payload: &str) -> Result<RotationState> {
    if payload.trim().is_empty() {
        return Err(DecodeError::Empty { kind: EventKind::State });
    }

    let fields: Vec<&str> = payload.split(',').collect();
    let [flag, duration] = fields.as_slice() else {
        return Err(DecodeError::FieldCount {
            kind: EventKind::State,
            expected: STATE_FIELDS,
            found: fields.len(),
        });
    };

    let ms_since_last_movement = parse_unsigned(EventKind::State, duration.trim())?;
    Ok(RotationState { is_rotating: flag.trim() == "1", ms_since_last_movement })
}

fn parse_unsigned(kind: EventKind, text: &str) -> Result<u64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecodeError::InvalidInteger { kind, value: text.to_owned() });
    }
    text.parse().map_err(|_| DecodeError::InvalidInteger { kind, value: text.to_owned() })
}

fn parse_speed_field(field: &str) -> Option<f64> {
    let value: f64 = field.trim().parse().ok()?;
    // `-0` passes the sign check; abs() drops its sign bit.
    (value.is_finite() && value >= 0.0).then_some(value.abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_accepts_plain_count() {
        assert_eq!(decode_rotation("42"), Ok(42));
        assert_eq!(decode_rotation(" 7\r\n"), Ok(7));
        assert_eq!(decode_rotation("0"), Ok(0));
    }

    #[test]
    fn rotation_rejects_non_numeric() {
        assert!(matches!(decode_rotation("abc"), Err(DecodeError::InvalidInteger { .. })));
        assert!(matches!(decode_rotation("-3"), Err(DecodeError::InvalidInteger { .. })));
        assert!(matches!(decode_rotation("+3"), Err(DecodeError::InvalidInteger { .. })));
        assert!(matches!(decode_rotation("1.5"), Err(DecodeError::InvalidInteger { .. })));
        assert!(matches!(decode_rotation("12 34"), Err(DecodeError::InvalidInteger { .. })));
        assert_eq!(decode_rotation("  "), Err(DecodeError::Empty { kind: EventKind::Rotation }));
    }

    #[test]
    fn rotation_rejects_overflow() {
        assert!(matches!(
            decode_rotation("99999999999999999999999"),
            Err(DecodeError::InvalidInteger { .. })
        ));
    }

    #[test]
    fn speed_full_payload() {
        let sample = decode_speed("1.25,9.5,3").expect("valid payload");
        assert_eq!(sample.current, Some(1.25));
        assert_eq!(sample.max, Some(9.5));
        assert_eq!(sample.average, Some(3.0));
    }

    #[test]
    fn speed_missing_middle_field() {
        let sample = decode_speed("3.5,,9.1").expect("valid payload");
        assert_eq!(sample.current, Some(3.5));
        assert_eq!(sample.max, None);
        assert_eq!(sample.average, Some(9.1));
    }

    #[test]
    fn speed_short_payload_leaves_tail_empty() {
        let sample = decode_speed("2.0").expect("valid payload");
        assert_eq!(sample, SpeedSample { current: Some(2.0), max: None, average: None });
    }

    #[test]
    fn speed_rejects_nan_inf_and_negative_fields() {
        let sample = decode_speed("NaN,inf,-1").err();
        assert_eq!(sample, Some(DecodeError::NoUsableField { kind: EventKind::Speed }));

        let sample = decode_speed("nan,4,x").expect("valid payload");
        assert_eq!(sample, SpeedSample { current: None, max: Some(4.0), average: None });
    }

    #[test]
    fn speed_negative_zero_reads_as_zero() {
        let sample = decode_speed("-0,-0.0,0").expect("valid payload");
        for value in [sample.current, sample.max, sample.average] {
            let value = value.expect("field present");
            assert_eq!(value, 0.0);
            assert!(value.is_sign_positive());
        }
    }

    #[test]
    fn speed_rejects_extra_fields() {
        assert_eq!(
            decode_speed("1,2,3,4"),
            Err(DecodeError::FieldCount { kind: EventKind::Speed, expected: 3, found: 4 })
        );
    }

    #[test]
    fn state_rotating() {
        let state = decode_state("1,450").expect("valid payload");
        assert!(state.is_rotating);
        assert_eq!(state.ms_since_last_movement, 450);
    }

    #[test]
    fn state_flag_is_literal_one() {
        assert!(!decode_state("0,2500").expect("valid payload").is_rotating);
        assert!(!decode_state("true,10").expect("valid payload").is_rotating);
        assert!(!decode_state("11,10").expect("valid payload").is_rotating);
        assert!(decode_state(" 1 , 10").expect("valid payload").is_rotating);
    }

    #[test]
    fn state_rejects_bad_duration() {
        assert!(matches!(decode_state("1,"), Err(DecodeError::InvalidInteger { .. })));
        assert!(matches!(decode_state("1,soon"), Err(DecodeError::InvalidInteger { .. })));
        assert_eq!(
            decode_state("1"),
            Err(DecodeError::FieldCount { kind: EventKind::State, expected: 2, found: 1 })
        );
        assert_eq!(
            decode_state("1,2,3"),
            Err(DecodeError::FieldCount { kind: EventKind::State, expected: 2, found: 3 })
        );
    }

    #[test]
    fn error_reports_kind() {
        assert_eq!(decode_state("").unwrap_err().kind(), EventKind::State);
        assert_eq!(decode_speed(",,").unwrap_err().kind(), EventKind::Speed);
    }
}
