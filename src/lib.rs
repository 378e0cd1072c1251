//! syncaudio - offset detection and lossless sync for audio tracks.
//!
//! This crate contains the full sync pipeline with no UI or CLI
//! dependencies, so it can be driven by a thin command-line wrapper or a
//! GUI shell. Given two tracks carrying the same performance, it decodes a
//! bounded leading window of each, downsamples to an analysis rate,
//! cross-correlates the signals to find the best lag, translates that lag
//! into a delay/trim edit, and delegates to mkvmerge to stream-copy the
//! edited track into a new container.

pub mod analysis;
pub mod config;
pub mod logging;
pub mod models;
pub mod mux;
pub mod pipeline;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
