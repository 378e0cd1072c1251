//! Cross-correlation of two analysis-rate signals.
//!
//! Pure functions with no I/O. The correlation is defined directly: for
//! every candidate lag L, `corr(L) = sum(src[i] * dst[i+L])` over the
//! overlapping indices, normalized by the overlap length and by the
//! signals' energies so scores are comparable across lags and lengths.
//! For large windows the same values are computed in the frequency domain
//! (`IFFT(conj(FFT(src)) * FFT(dst))`), which must find the same peak lag
//! up to floating-point rounding - `peaks_agree_between_direct_and_fft`
//! holds the two paths to that.

use rustfft::{num_complex::Complex, FftPlanner};

use crate::models::{SyncError, SyncResult};

use super::types::{AudioSignal, CorrelationResult};

/// Raw correlation lengths up to this are computed with the direct double
/// loop; longer inputs go through the FFT path.
const DIRECT_MAX_LEN: usize = 16_384;

/// Lags overlapping fewer than 1/8 of the shorter signal are skipped:
/// dividing a near-empty sum by a tiny overlap makes noise look like a
/// peak.
const OVERLAP_DIVISOR: usize = 8;

/// Energy at or below this counts as silence.
const SILENCE_EPSILON: f64 = 1e-12;

/// Correlate two signals at the same sample rate and return the best lag.
///
/// Positive `lag_samples` means the destination's content appears later
/// than the source's corresponding content.
///
/// Fails with `SyncError::InsufficientSignal` when either signal is empty
/// or silent (zero energy) - correlation is undefined there and a
/// fabricated lag of 0 would be worse than an error. A sample-rate
/// mismatch is a caller bug and fails with `SyncError::Resample`.
pub fn correlate(
    source: &AudioSignal,
    destination: &AudioSignal,
) -> SyncResult<CorrelationResult> {
    if source.is_empty() {
        return Err(SyncError::InsufficientSignal(
            "source signal is empty".to_string(),
        ));
    }
    if destination.is_empty() {
        return Err(SyncError::InsufficientSignal(
            "destination signal is empty".to_string(),
        ));
    }
    if source.sample_rate != destination.sample_rate {
        return Err(SyncError::Resample(format!(
            "signals must share a sample rate for correlation: {} vs {}",
            source.sample_rate, destination.sample_rate
        )));
    }

    let source_energy = source.energy();
    if source_energy <= SILENCE_EPSILON {
        return Err(SyncError::InsufficientSignal(
            "source signal is silent".to_string(),
        ));
    }
    let destination_energy = destination.energy();
    if destination_energy <= SILENCE_EPSILON {
        return Err(SyncError::InsufficientSignal(
            "destination signal is silent".to_string(),
        ));
    }

    let ns = source.len();
    let nd = destination.len();

    let raw = if ns + nd - 1 <= DIRECT_MAX_LEN {
        direct_cross_correlation(&source.samples, &destination.samples)
    } else {
        fft_cross_correlation(&source.samples, &destination.samples)
    };

    // Geometric mean of the per-sample energies; a perfectly aligned
    // identical pair scores ~1.0 after the per-lag overlap division.
    let rms_product =
        (source_energy / ns as f64).sqrt() * (destination_energy / nd as f64).sqrt();

    let (lag, peak) = find_peak(&raw, ns, nd, rms_product);

    Ok(CorrelationResult {
        lag_samples: lag,
        sample_rate: source.sample_rate,
        confidence: peak.clamp(0.0, 1.0),
        peak,
    })
}

/// Reference definition: correlation sums for every lag from `-(nd-1)` to
/// `ns-1`. Index `j` of the result holds lag `j - (nd - 1)`.
fn direct_cross_correlation(src: &[f64], dst: &[f64]) -> Vec<f64> {
    if src.is_empty() || dst.is_empty() {
        return Vec::new();
    }
    let ns = src.len();
    let nd = dst.len();
    let mut raw = vec![0.0; ns + nd - 1];

    for (j, out) in raw.iter_mut().enumerate() {
        let lag = j as i64 - (nd as i64 - 1);
        let i_start = (-lag).max(0) as usize;
        let i_end = (ns as i64).min(nd as i64 - lag).max(0) as usize;

        let mut sum = 0.0;
        for i in i_start..i_end {
            sum += src[i] * dst[(i as i64 + lag) as usize];
        }
        *out = sum;
    }

    raw
}

/// Frequency-domain path, functionally equivalent to
/// [`direct_cross_correlation`] but O(n log n). Same output layout.
fn fft_cross_correlation(src: &[f64], dst: &[f64]) -> Vec<f64> {
    if src.is_empty() || dst.is_empty() {
        return Vec::new();
    }
    let ns = src.len();
    let nd = dst.len();
    let raw_len = ns + nd - 1;
    // Zero-pad past the full correlation length so circular wrap-around
    // cannot alias linear lags.
    let fft_len = raw_len.next_power_of_two();

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(fft_len);
    let ifft = planner.plan_fft_inverse(fft_len);

    let mut src_c: Vec<Complex<f64>> = src.iter().map(|&x| Complex::new(x, 0.0)).collect();
    src_c.resize(fft_len, Complex::new(0.0, 0.0));
    let mut dst_c: Vec<Complex<f64>> = dst.iter().map(|&x| Complex::new(x, 0.0)).collect();
    dst_c.resize(fft_len, Complex::new(0.0, 0.0));

    fft.process(&mut src_c);
    fft.process(&mut dst_c);

    let mut product: Vec<Complex<f64>> = src_c
        .iter()
        .zip(dst_c.iter())
        .map(|(s, d)| s.conj() * d)
        .collect();

    ifft.process(&mut product);

    // product[k] now holds sum(src[i] * dst[i+k]) circularly; negative lags
    // sit at the top of the buffer. rustfft leaves a factor of fft_len in.
    let scale = 1.0 / fft_len as f64;
    (0..raw_len)
        .map(|j| {
            let lag = j as i64 - (nd as i64 - 1);
            let idx = if lag >= 0 {
                lag as usize
            } else {
                fft_len - (-lag) as usize
            };
            product[idx].re * scale
        })
        .collect()
}

/// Overlap length between the two signals at a given lag.
fn overlap_len(ns: usize, nd: usize, lag: i64) -> usize {
    let start = (-lag).max(0);
    let end = (ns as i64).min(nd as i64 - lag);
    (end - start).max(0) as usize
}

/// Normalize each raw sum by its overlap and the energy term, then pick
/// the best-scoring lag.
fn find_peak(raw: &[f64], ns: usize, nd: usize, rms_product: f64) -> (i64, f64) {
    let min_overlap = (ns.min(nd) / OVERLAP_DIVISOR).max(1);

    let mut best_lag = 0i64;
    let mut best_score = f64::NEG_INFINITY;

    for (j, &sum) in raw.iter().enumerate() {
        let lag = j as i64 - (nd as i64 - 1);
        let overlap = overlap_len(ns, nd, lag);
        if overlap < min_overlap {
            continue;
        }

        let score = sum / (overlap as f64 * rms_product);
        if score > best_score {
            best_score = score;
            best_lag = lag;
        }
    }

    (best_lag, best_score)
}
