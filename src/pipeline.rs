//! One sync run, end to end.
//!
//! Orchestrates the stages sequentially: decode both inputs, reduce to the
//! analysis rate, correlate, translate the lag into an offset, then
//! assemble one output per target. The collaborators are injected so the
//! whole pipeline runs against synthetic signals in tests.

use std::path::{Path, PathBuf};

use crate::analysis::{measure_offset, AudioDecoder, CorrelationResult, FfmpegDecoder};
use crate::config::Settings;
use crate::models::{EditPlan, OffsetSpec, SyncResult};
use crate::mux::{self, default_output_path, MkvmergeMuxer, Muxer};

/// Outcome of a completed sync run.
///
/// Low confidence is the one non-fatal condition in the taxonomy: the
/// offset is still produced, but `low_confidence` tells the caller a human
/// should sanity-check the alignment before trusting it.
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    /// The correlation measurement the run was based on.
    pub correlation: CorrelationResult,
    /// The offset applied to every target.
    pub offset: OffsetSpec,
    /// Whether confidence fell below the configured threshold.
    pub low_confidence: bool,
    /// The edit plans that were assembled, in execution order.
    pub plans: Vec<EditPlan>,
    /// Output files written, one per target.
    pub outputs: Vec<PathBuf>,
}

/// The full sync pipeline with its collaborators.
pub struct SyncPipeline<D: AudioDecoder, M: Muxer> {
    decoder: D,
    muxer: M,
    settings: Settings,
}

impl SyncPipeline<FfmpegDecoder, MkvmergeMuxer> {
    /// Pipeline wired to the external ffmpeg/mkvmerge tools named in the
    /// settings.
    pub fn with_default_tools(settings: Settings) -> SyncResult<Self> {
        let decoder = FfmpegDecoder::new(settings.tools.ffmpeg.clone());
        let muxer = MkvmergeMuxer::new(settings.tools.mkvmerge.clone());
        Self::new(decoder, muxer, settings)
    }
}

impl<D: AudioDecoder, M: Muxer> SyncPipeline<D, M> {
    /// Create a pipeline. Settings are validated here, at the boundary;
    /// nothing downstream re-checks them.
    pub fn new(decoder: D, muxer: M, settings: Settings) -> SyncResult<Self> {
        settings.validate()?;
        Ok(Self {
            decoder,
            muxer,
            settings,
        })
    }

    /// Run the pipeline: measure the offset of `destination` against
    /// `source`, then assemble a synced container for the destination and,
    /// when given, for `apply_to` using the same offset.
    ///
    /// Stateless and deterministic: identical inputs yield identical
    /// outcomes.
    pub fn run(
        &self,
        source: &Path,
        destination: &Path,
        apply_to: Option<&Path>,
    ) -> SyncResult<SyncOutcome> {
        let analysis = &self.settings.analysis;

        tracing::info!(
            "analyzing first {:.0}s of {} against {}",
            analysis.trim_secs,
            destination.display(),
            source.display()
        );

        let source_signal =
            self.decoder
                .decode(source, analysis.decode_sample_rate, analysis.trim_secs)?;
        let destination_signal =
            self.decoder
                .decode(destination, analysis.decode_sample_rate, analysis.trim_secs)?;

        // Shorter inputs shrink the window; the ambiguity bound must use
        // what was actually observable, not the configured trim.
        let window_secs = source_signal
            .duration_secs()
            .min(destination_signal.duration_secs());

        let correlation = measure_offset(
            source_signal,
            destination_signal,
            analysis.analysis_sample_rate,
        )?;

        let low_confidence = correlation.confidence < analysis.min_confidence;
        if low_confidence {
            tracing::warn!(
                "low-confidence correlation ({:.3} < {:.3}); verify the result manually",
                correlation.confidence,
                analysis.min_confidence
            );
        }

        let offset = mux::translate(&correlation, window_secs)?;
        tracing::info!(
            "offset: {:.3}s {:?} (lag {} samples at {} Hz, confidence {:.3})",
            offset.offset_secs,
            offset.direction,
            correlation.lag_samples,
            correlation.sample_rate,
            correlation.confidence
        );

        let mut targets: Vec<&Path> = vec![destination];
        if let Some(extra) = apply_to {
            targets.push(extra);
        }

        let mut plans = Vec::with_capacity(targets.len());
        let mut outputs = Vec::with_capacity(targets.len());
        for target in targets {
            let plan = EditPlan {
                target: target.to_path_buf(),
                offset,
                output: default_output_path(
                    target,
                    &offset,
                    self.settings.output.output_folder.as_deref(),
                ),
            };
            let written = self.muxer.mux(&plan)?;
            plans.push(plan);
            outputs.push(written);
        }

        Ok(SyncOutcome {
            correlation,
            offset,
            low_confidence,
            plans,
            outputs,
        })
    }
}
