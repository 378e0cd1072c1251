//! Offset translation - the single source of truth for offset math.
//!
//! All sign handling lives here; nothing else in the crate adds or negates
//! an offset.
//!
//! # Rules
//!
//! Lag sign (from the correlator): positive lag means the destination's
//! content appears *later* than the source's corresponding content; the
//! destination carries that much extra lead.
//!
//! - positive lag -> `Direction::Delay`, magnitude `lag / rate`
//! - negative lag -> `Direction::Trim`, magnitude `|lag| / rate`
//! - zero lag -> `Delay` with magnitude 0 (no edit either way)
//!
//! The concrete container edit must *cancel* the measured offset, not
//! reproduce it: a destination that is late gets advanced, one that is
//! early gets held back. [`container_sync_ms`] performs that inversion
//! when mapping to mkvmerge's `--sync` value, which shifts a track's
//! timestamps by the given (integer) milliseconds.
//!
//! An offset the analysis window could not have observed is meaningless:
//! if the magnitude reaches the window length, translation fails with
//! `AmbiguousOffset` and the caller is told to widen the trim window.

use crate::analysis::CorrelationResult;
use crate::models::{Direction, OffsetSpec, SyncError, SyncResult};

/// Convert a correlation result into an offset spec.
///
/// `window_secs` is the effective analysis window: the shorter of the two
/// loaded signals' durations (a short file shrinks the window below the
/// configured trim).
pub fn translate(result: &CorrelationResult, window_secs: f64) -> SyncResult<OffsetSpec> {
    let offset_secs = result.lag_secs().abs();

    if offset_secs >= window_secs {
        return Err(SyncError::AmbiguousOffset {
            offset_secs,
            window_secs,
        });
    }

    let direction = if result.lag_samples >= 0 {
        Direction::Delay
    } else {
        Direction::Trim
    };

    Ok(OffsetSpec::new(offset_secs, direction))
}

/// The `--sync` value (integer milliseconds) that cancels the offset.
///
/// mkvmerge only accepts whole milliseconds; rounding happens here and
/// nowhere else.
pub fn container_sync_ms(offset: &OffsetSpec) -> i64 {
    let magnitude_ms = (offset.offset_secs * 1000.0).round() as i64;
    match offset.direction {
        // Destination is late: advance it.
        Direction::Delay => -magnitude_ms,
        // Destination is early: hold it back.
        Direction::Trim => magnitude_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(lag_samples: i64, sample_rate: u32) -> CorrelationResult {
        CorrelationResult {
            lag_samples,
            sample_rate,
            confidence: 0.9,
            peak: 0.9,
        }
    }

    #[test]
    fn positive_lag_translates_to_delay() {
        let spec = translate(&result(20_000, 8000), 900.0).unwrap();
        assert_eq!(spec.direction, Direction::Delay);
        assert!((spec.offset_secs - 2.5).abs() < 1e-12);
    }

    #[test]
    fn negative_lag_translates_to_trim() {
        let spec = translate(&result(-4000, 8000), 900.0).unwrap();
        assert_eq!(spec.direction, Direction::Trim);
        assert!((spec.offset_secs - 0.5).abs() < 1e-12);
    }

    #[test]
    fn zero_lag_is_a_zero_delay() {
        let spec = translate(&result(0, 8000), 900.0).unwrap();
        assert_eq!(spec.direction, Direction::Delay);
        assert_eq!(spec.offset_secs, 0.0);
        assert_eq!(container_sync_ms(&spec), 0);
    }

    #[test]
    fn magnitude_is_lag_over_rate() {
        let spec = translate(&result(12_345, 8000), 900.0).unwrap();
        assert!((spec.offset_secs - 12_345.0 / 8000.0).abs() < 1e-12);
    }

    #[test]
    fn offset_at_window_length_is_ambiguous() {
        // 8000 samples at 8 kHz = 1.0s, exactly the window length.
        let err = translate(&result(8000, 8000), 1.0).unwrap_err();
        assert!(matches!(err, SyncError::AmbiguousOffset { .. }));

        // Beyond the window, same story (negative side).
        let err = translate(&result(-16_000, 8000), 1.0).unwrap_err();
        assert!(matches!(err, SyncError::AmbiguousOffset { .. }));
    }

    #[test]
    fn offset_inside_window_is_accepted() {
        assert!(translate(&result(7999, 8000), 1.0).is_ok());
    }

    #[test]
    fn sync_value_inverts_the_detected_lag() {
        // Late destination (Delay) is advanced by a negative sync.
        let delay = OffsetSpec::new(2.5, Direction::Delay);
        assert_eq!(container_sync_ms(&delay), -2500);

        // Early destination (Trim) is held back by a positive sync.
        let trim = OffsetSpec::new(0.75, Direction::Trim);
        assert_eq!(container_sync_ms(&trim), 750);
    }

    #[test]
    fn sync_value_rounds_to_whole_milliseconds() {
        let spec = OffsetSpec::new(1.0 / 3.0, Direction::Trim);
        assert_eq!(container_sync_ms(&spec), 333);
    }
}
