//! Downsampling to the analysis rate.
//!
//! Correlation cost grows with signal length, so both signals are reduced
//! to a rate just above the dominant dialogue spectrum (8 kHz keeps
//! content up to 4 kHz) before correlating. Linear interpolation is enough
//! here: the goal is temporal alignment, not playback quality.

use crate::models::{SyncError, SyncResult};

use super::types::AudioSignal;

/// Downsample a signal to `target_rate`.
///
/// Consumes the input signal; each stage owns its data exactly once.
/// If the signal is already at or below the target rate this is a no-op:
/// upsampling would add no information, and the caller is responsible for
/// feeding the correlator two signals at a common rate.
///
/// Fails with `SyncError::Resample` if `target_rate` is zero.
pub fn downsample(signal: AudioSignal, target_rate: u32) -> SyncResult<AudioSignal> {
    if target_rate == 0 {
        return Err(SyncError::Resample(
            "target sample rate must be positive".to_string(),
        ));
    }

    if signal.sample_rate <= target_rate {
        return Ok(signal);
    }

    let ratio = signal.sample_rate as f64 / target_rate as f64;
    let output_len = (signal.samples.len() as f64 / ratio).floor() as usize;
    let mut output = Vec::with_capacity(output_len);

    for i in 0..output_len {
        let src_pos = i as f64 * ratio;
        let src_idx = src_pos as usize;
        let frac = src_pos - src_idx as f64;

        let value = if src_idx + 1 < signal.samples.len() {
            signal.samples[src_idx] * (1.0 - frac) + signal.samples[src_idx + 1] * frac
        } else {
            signal.samples[src_idx]
        };
        output.push(value);
    }

    Ok(AudioSignal::new(output, target_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downsample_reduces_rate_and_length() {
        let samples: Vec<f64> = (0..48_000).map(|i| (i as f64 * 0.001).sin()).collect();
        let signal = AudioSignal::new(samples, 48_000);

        let out = downsample(signal, 8000).unwrap();

        assert_eq!(out.sample_rate, 8000);
        assert_eq!(out.len(), 8000);
        assert!((out.duration_secs() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn downsample_preserves_integer_ratio_samples() {
        // 48k -> 8k is an exact 6:1 ratio, so output samples land on input
        // sample positions with no interpolation error.
        let samples: Vec<f64> = (0..600).map(|i| i as f64).collect();
        let signal = AudioSignal::new(samples, 48_000);

        let out = downsample(signal, 8000).unwrap();

        assert_eq!(out.len(), 100);
        for (i, &s) in out.samples.iter().enumerate() {
            assert!((s - (i * 6) as f64).abs() < 1e-9);
        }
    }

    #[test]
    fn downsample_is_noop_at_or_below_target() {
        let signal = AudioSignal::new(vec![0.1, 0.2, 0.3], 8000);
        let out = downsample(signal.clone(), 8000).unwrap();
        assert_eq!(out.sample_rate, 8000);
        assert_eq!(out.samples, signal.samples);

        // Never upsample - the lower rate is preserved as-is.
        let low = AudioSignal::new(vec![0.1, 0.2], 4000);
        let out = downsample(low, 8000).unwrap();
        assert_eq!(out.sample_rate, 4000);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn downsample_rejects_zero_rate() {
        let signal = AudioSignal::new(vec![0.0; 10], 8000);
        assert!(matches!(
            downsample(signal, 0),
            Err(SyncError::Resample(_))
        ));
    }
}
