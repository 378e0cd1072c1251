//! Offset description and per-target edit plans.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Which way the destination sits relative to the source timeline.
///
/// The sign of a detected lag lives here, never in a negative magnitude,
/// so downstream code cannot misread the direction of an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Destination content appears later than the source's (positive lag).
    Delay,
    /// Destination content appears earlier than the source's (negative lag).
    Trim,
}

/// A signed real-world time offset, split into magnitude and direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OffsetSpec {
    /// Offset magnitude in seconds. Always >= 0.
    pub offset_secs: f64,
    /// Which edit the offset describes.
    pub direction: Direction,
}

impl OffsetSpec {
    /// Create an offset spec. The magnitude is taken as an absolute value
    /// to uphold the non-negative invariant.
    pub fn new(offset_secs: f64, direction: Direction) -> Self {
        Self {
            offset_secs: offset_secs.abs(),
            direction,
        }
    }
}

/// One planned edit: apply `offset` to `target` and write the result to
/// `output`. Created once per target file and consumed exactly once by the
/// output assembler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditPlan {
    /// File receiving the edit.
    pub target: PathBuf,
    /// Offset to apply, shared verbatim between destination and apply-to.
    pub offset: OffsetSpec,
    /// Path of the container to produce. Never an input path.
    pub output: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_spec_magnitude_is_non_negative() {
        let spec = OffsetSpec::new(-2.5, Direction::Trim);
        assert_eq!(spec.offset_secs, 2.5);
        assert_eq!(spec.direction, Direction::Trim);
    }

    #[test]
    fn direction_serializes_lowercase() {
        let json = serde_json::to_string(&Direction::Delay).unwrap();
        assert_eq!(json, "\"delay\"");
    }
}
