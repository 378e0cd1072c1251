//! Signal loading via an external decoder.
//!
//! The core never parses container formats itself. A narrow collaborator
//! trait hands back mono PCM for a bounded leading window of a file, and
//! the concrete implementation spawns ffmpeg to do the decode. Tests drive
//! the pipeline with synthetic decoders instead of real files.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::models::{SyncError, SyncResult};

use super::types::AudioSignal;

/// Collaborator that produces a mono `AudioSignal` for the leading
/// `trim_secs` of a file, decoded at `sample_rate`.
///
/// Multi-channel audio is downmixed to mono by equal-weight channel
/// averaging, not by picking channel 0, so panned dialogue does not bias
/// the correlation.
pub trait AudioDecoder {
    /// Decode at most `trim_secs` seconds from the start of `path`.
    ///
    /// Fails with `SyncError::Decode` if the file cannot be read or
    /// contains no audio stream. Must not mutate the source file.
    fn decode(&self, path: &Path, sample_rate: u32, trim_secs: f64) -> SyncResult<AudioSignal>;
}

/// Decoder backed by an ffmpeg subprocess.
///
/// ffmpeg writes raw f64le samples to stdout; nothing is staged on disk.
pub struct FfmpegDecoder {
    /// ffmpeg executable to invoke ("ffmpeg" resolves via PATH).
    tool: String,
}

impl FfmpegDecoder {
    /// Create a decoder using the given ffmpeg executable.
    pub fn new(tool: impl Into<String>) -> Self {
        Self { tool: tool.into() }
    }
}

impl Default for FfmpegDecoder {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl AudioDecoder for FfmpegDecoder {
    fn decode(&self, path: &Path, sample_rate: u32, trim_secs: f64) -> SyncResult<AudioSignal> {
        if !path.exists() {
            return Err(SyncError::Decode {
                path: path.to_path_buf(),
                reason: "file not found".to_string(),
            });
        }

        let decode_err = |reason: String| SyncError::Decode {
            path: path.to_path_buf(),
            reason,
        };

        let mut cmd = Command::new(&self.tool);
        cmd.arg("-i")
            .arg(path)
            .arg("-t")
            .arg(format!("{trim_secs:.3}"))
            .arg("-vn")
            .arg("-ac")
            .arg("1") // equal-weight downmix to mono
            .arg("-ar")
            .arg(sample_rate.to_string())
            .arg("-f")
            .arg("f64le")
            .arg("-codec:a")
            .arg("pcm_f64le")
            .arg("pipe:1");
        cmd.stdout(Stdio::piped()).stderr(Stdio::null());

        tracing::debug!("running decoder: {:?}", cmd);

        let mut child = cmd
            .spawn()
            .map_err(|e| decode_err(format!("failed to spawn {}: {}", self.tool, e)))?;

        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| decode_err("failed to capture decoder stdout".to_string()))?;

        let mut buffer = Vec::new();
        stdout
            .read_to_end(&mut buffer)
            .map_err(|e| decode_err(format!("failed to read decoder output: {e}")))?;

        let status = child
            .wait()
            .map_err(|e| decode_err(format!("decoder process error: {e}")))?;

        if !status.success() {
            return Err(decode_err(format!(
                "decoder exited with code {:?}",
                status.code()
            )));
        }

        let samples = bytes_to_f64_samples(&buffer);
        if samples.is_empty() {
            return Err(decode_err("no audio stream decoded".to_string()));
        }

        tracing::debug!(
            "decoded {} samples ({:.2}s) from {}",
            samples.len(),
            samples.len() as f64 / sample_rate as f64,
            path.display()
        );

        Ok(AudioSignal::new(samples, sample_rate))
    }
}

/// Convert raw little-endian bytes to f64 samples.
fn bytes_to_f64_samples(bytes: &[u8]) -> Vec<f64> {
    bytes
        .chunks_exact(8)
        .map(|chunk| {
            let arr: [u8; 8] = chunk.try_into().unwrap();
            f64::from_le_bytes(arr)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_to_samples_converts_correctly() {
        let val1: f64 = 0.5;
        let val2: f64 = -0.25;

        let mut bytes = Vec::new();
        bytes.extend_from_slice(&val1.to_le_bytes());
        bytes.extend_from_slice(&val2.to_le_bytes());

        let samples = bytes_to_f64_samples(&bytes);

        assert_eq!(samples.len(), 2);
        assert!((samples[0] - 0.5).abs() < 1e-12);
        assert!((samples[1] + 0.25).abs() < 1e-12);
    }

    #[test]
    fn bytes_to_samples_ignores_trailing_partial_frame() {
        let bytes = vec![0u8; 10];
        assert_eq!(bytes_to_f64_samples(&bytes).len(), 1);
    }

    #[test]
    fn decode_rejects_missing_file() {
        let decoder = FfmpegDecoder::default();
        let result = decoder.decode(Path::new("/nonexistent/input.mka"), 48000, 900.0);
        assert!(matches!(result, Err(SyncError::Decode { .. })));
    }
}
