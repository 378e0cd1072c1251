//! Audio analysis: signal loading, downsampling, and correlation.
//!
//! The stages are deliberately separate and pure where possible: the
//! decoder is the only piece that touches a process, and the correlator
//! never does I/O. `measure_offset` wires them together for a pair of
//! already-loaded signals.

pub mod correlation;
pub mod decoder;
pub mod resample;
pub mod types;

pub use correlation::correlate;
pub use decoder::{AudioDecoder, FfmpegDecoder};
pub use resample::downsample;
pub use types::{AudioSignal, CorrelationResult};

use crate::models::SyncResult;

/// Downsample both signals to the analysis rate and correlate them.
///
/// Consumes the signals: they exist for exactly one measurement.
pub fn measure_offset(
    source: AudioSignal,
    destination: AudioSignal,
    analysis_rate: u32,
) -> SyncResult<CorrelationResult> {
    let source = downsample(source, analysis_rate)?;
    let destination = downsample(destination, analysis_rate)?;

    tracing::debug!(
        "correlating {:.1}s against {:.1}s at {} Hz",
        source.duration_secs(),
        destination.duration_secs(),
        source.sample_rate
    );

    correlate(&source, &destination)
}
