//! Core types for audio analysis.

use serde::{Deserialize, Serialize};

/// Mono audio decoded from a source file.
///
/// Produced once by a stage and moved into the next one; never mutated in
/// place.
#[derive(Debug, Clone)]
pub struct AudioSignal {
    /// Audio samples as f64, mono.
    pub samples: Vec<f64>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl AudioSignal {
    /// Create a signal from samples at the given rate.
    pub fn new(samples: Vec<f64>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the signal carries no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Total signal energy (sum of squared samples).
    pub fn energy(&self) -> f64 {
        self.samples.iter().map(|x| x * x).sum()
    }
}

/// Result of correlating two signals.
///
/// `lag_samples` is only meaningful relative to `sample_rate`: the lag is
/// measured in analysis-rate samples, not in the sources' native rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    /// Best lag in samples. Positive means the destination's content
    /// appears later than the source's corresponding content.
    pub lag_samples: i64,
    /// Analysis sample rate the lag was measured at (Hz).
    pub sample_rate: u32,
    /// Normalized peak score relative to the signals' self-correlation,
    /// clamped to [0, 1]. ~1.0 means near-perfect alignment at the lag.
    pub confidence: f64,
    /// Raw normalized score at the peak (unclamped).
    pub peak: f64,
}

impl CorrelationResult {
    /// Lag expressed in seconds (signed).
    pub fn lag_secs(&self) -> f64 {
        self.lag_samples as f64 / self.sample_rate as f64
    }
}
