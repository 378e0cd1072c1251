//! Settings with TOML-based sections.
//!
//! The original tool took its knobs as bare function defaults with no
//! validation; here they are explicit configuration, organized into
//! sections that map to TOML tables and validated at the boundary before
//! a run starts.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::models::{SyncError, SyncResult};

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Offset-analysis settings.
    #[serde(default)]
    pub analysis: AnalysisSettings,

    /// External tool locations.
    #[serde(default)]
    pub tools: ToolSettings,

    /// Output placement.
    #[serde(default)]
    pub output: OutputSettings,
}

/// Knobs for the offset-detection pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// How many leading seconds of each input to analyze.
    #[serde(default = "default_trim_secs")]
    pub trim_secs: f64,

    /// Rate the decoder collaborator delivers PCM at.
    #[serde(default = "default_decode_sample_rate")]
    pub decode_sample_rate: u32,

    /// Rate the signals are reduced to before correlation. Lower is
    /// cheaper, higher is more precise; 8 kHz keeps everything up to
    /// 4 kHz, comfortably covering dialogue.
    #[serde(default = "default_analysis_sample_rate")]
    pub analysis_sample_rate: u32,

    /// Correlation confidence below this flags the run as low-confidence.
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,
}

fn default_trim_secs() -> f64 {
    900.0
}

fn default_decode_sample_rate() -> u32 {
    48_000
}

fn default_analysis_sample_rate() -> u32 {
    8000
}

fn default_min_confidence() -> f64 {
    0.3
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            trim_secs: default_trim_secs(),
            decode_sample_rate: default_decode_sample_rate(),
            analysis_sample_rate: default_analysis_sample_rate(),
            min_confidence: default_min_confidence(),
        }
    }
}

/// External decoder/muxer executables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSettings {
    /// ffmpeg executable.
    #[serde(default = "default_ffmpeg")]
    pub ffmpeg: String,

    /// mkvmerge executable.
    #[serde(default = "default_mkvmerge")]
    pub mkvmerge: String,
}

fn default_ffmpeg() -> String {
    "ffmpeg".to_string()
}

fn default_mkvmerge() -> String {
    "mkvmerge".to_string()
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            ffmpeg: default_ffmpeg(),
            mkvmerge: default_mkvmerge(),
        }
    }
}

/// Output placement settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Folder for produced containers. When unset, outputs land next to
    /// their target files.
    #[serde(default)]
    pub output_folder: Option<PathBuf>,
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> SyncResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&text)
            .map_err(|e| SyncError::Config(format!("{}: {}", path.display(), e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a TOML file.
    pub fn save(&self, path: &Path) -> SyncResult<()> {
        let text = toml::to_string_pretty(self)
            .map_err(|e| SyncError::Config(format!("serialize settings: {e}")))?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Validate every recognized option. Called before a run; nothing
    /// downstream trusts these values implicitly.
    pub fn validate(&self) -> SyncResult<()> {
        let a = &self.analysis;

        if !a.trim_secs.is_finite() || a.trim_secs <= 0.0 {
            return Err(SyncError::Config(format!(
                "trim_secs must be a positive number of seconds, got {}",
                a.trim_secs
            )));
        }
        if a.decode_sample_rate == 0 {
            return Err(SyncError::Config(
                "decode_sample_rate must be positive".to_string(),
            ));
        }
        if a.analysis_sample_rate == 0 {
            return Err(SyncError::Config(
                "analysis_sample_rate must be positive".to_string(),
            ));
        }
        if a.analysis_sample_rate > a.decode_sample_rate {
            return Err(SyncError::Config(format!(
                "analysis_sample_rate ({}) cannot exceed decode_sample_rate ({})",
                a.analysis_sample_rate, a.decode_sample_rate
            )));
        }
        if !(0.0..=1.0).contains(&a.min_confidence) {
            return Err(SyncError::Config(format!(
                "min_confidence must be in [0, 1], got {}",
                a.min_confidence
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_knobs() {
        let settings = Settings::default();
        assert_eq!(settings.analysis.trim_secs, 900.0);
        assert_eq!(settings.analysis.decode_sample_rate, 48_000);
        assert_eq!(settings.analysis.analysis_sample_rate, 8000);
        assert_eq!(settings.tools.ffmpeg, "ffmpeg");
        assert_eq!(settings.tools.mkvmerge, "mkvmerge");
        assert!(settings.output.output_folder.is_none());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn partial_toml_falls_back_to_section_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [analysis]
            trim_secs = 120.0
            "#,
        )
        .unwrap();
        assert_eq!(settings.analysis.trim_secs, 120.0);
        assert_eq!(settings.analysis.analysis_sample_rate, 8000);
        assert_eq!(settings.tools.mkvmerge, "mkvmerge");
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut settings = Settings::default();
        settings.analysis.trim_secs = 0.0;
        assert!(matches!(settings.validate(), Err(SyncError::Config(_))));

        let mut settings = Settings::default();
        settings.analysis.analysis_sample_rate = 0;
        assert!(matches!(settings.validate(), Err(SyncError::Config(_))));

        let mut settings = Settings::default();
        settings.analysis.analysis_sample_rate = 96_000;
        assert!(matches!(settings.validate(), Err(SyncError::Config(_))));

        let mut settings = Settings::default();
        settings.analysis.min_confidence = 1.5;
        assert!(matches!(settings.validate(), Err(SyncError::Config(_))));
    }

    #[test]
    fn settings_round_trip_through_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("syncaudio.toml");

        let mut settings = Settings::default();
        settings.analysis.trim_secs = 300.0;
        settings.output.output_folder = Some(PathBuf::from("/tmp/out"));
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded.analysis.trim_secs, 300.0);
        assert_eq!(loaded.output.output_folder, Some(PathBuf::from("/tmp/out")));
    }
}
