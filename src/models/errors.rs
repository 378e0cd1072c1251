//! Error taxonomy for sync runs.
//!
//! Every stage fails fast and upward; none of these conditions are
//! transient, so there is no retry logic anywhere in the crate. Low
//! confidence is deliberately *not* represented here - a low-confidence
//! correlation still produces a result and is flagged on the outcome
//! instead (see `pipeline::SyncOutcome`).

use std::path::PathBuf;

/// Error types for sync operations.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Input could not be decoded (unreadable file, no audio stream,
    /// decoder process failure).
    #[error("decode failed for {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    /// Invalid resample parameters, or signals that should share a rate
    /// but do not.
    #[error("resample error: {0}")]
    Resample(String),

    /// Silent or empty input - correlation is undefined.
    #[error("insufficient signal: {0}")]
    InsufficientSignal(String),

    /// The computed offset is at least as large as the analysis window,
    /// so the window could not have observed the true offset.
    #[error(
        "ambiguous offset: {offset_secs:.3}s is outside the {window_secs:.1}s analysis window; \
         widen the trim window and re-run"
    )]
    AmbiguousOffset { offset_secs: f64, window_secs: f64 },

    /// External muxer reported failure (missing tool, unsupported codec,
    /// disk I/O error).
    #[error("mux failed: {0}")]
    Mux(String),

    /// Invalid configuration value rejected at the boundary.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for sync results.
pub type SyncResult<T> = Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambiguous_offset_message_names_the_window() {
        let err = SyncError::AmbiguousOffset {
            offset_secs: 912.5,
            window_secs: 900.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("912.5"));
        assert!(msg.contains("900.0s"));
    }

    #[test]
    fn io_errors_convert() {
        fn fails() -> SyncResult<()> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))?;
            Ok(())
        }
        assert!(matches!(fails(), Err(SyncError::Io(_))));
    }
}
