//! Output assembly via an external muxer.
//!
//! The assembler never touches audio payload bytes: the edit is a lossless
//! stream copy performed by mkvmerge, with the offset expressed as a
//! container-level `--sync` value. Exactly one new file is written per
//! edit plan; inputs are never overwritten, and a failed mux leaves no
//! partial output behind.

pub mod delay;
pub mod options_builder;

pub use delay::{container_sync_ms, translate};
pub use options_builder::MkvmergeOptionsBuilder;

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::models::{EditPlan, OffsetSpec, SyncError, SyncResult};

/// Collaborator that assembles the output container for one edit plan.
pub trait Muxer {
    /// Produce the plan's output file. Returns the written path.
    fn mux(&self, plan: &EditPlan) -> SyncResult<PathBuf>;
}

/// Muxer backed by an mkvmerge subprocess.
pub struct MkvmergeMuxer {
    /// mkvmerge executable to invoke ("mkvmerge" resolves via PATH).
    tool: String,
}

impl MkvmergeMuxer {
    /// Create a muxer using the given mkvmerge executable.
    pub fn new(tool: impl Into<String>) -> Self {
        Self { tool: tool.into() }
    }
}

impl Default for MkvmergeMuxer {
    fn default() -> Self {
        Self::new("mkvmerge")
    }
}

impl Muxer for MkvmergeMuxer {
    fn mux(&self, plan: &EditPlan) -> SyncResult<PathBuf> {
        if plan.output == plan.target {
            return Err(SyncError::Mux(format!(
                "refusing to overwrite input file {}",
                plan.target.display()
            )));
        }

        let tokens = MkvmergeOptionsBuilder::new(plan).build();
        tracing::info!("muxing {} -> {}", plan.target.display(), plan.output.display());
        tracing::debug!("{} {}", self.tool, tokens.join(" "));

        let output = Command::new(&self.tool)
            .args(&tokens)
            .output()
            .map_err(|e| SyncError::Mux(format!("failed to spawn {}: {}", self.tool, e)))?;

        // mkvmerge exit code 1 is warnings-only; anything else, including
        // death by signal (no exit code at all), is failure.
        if !matches!(output.status.code(), Some(0 | 1)) {
            remove_partial_output(&plan.output);
            return Err(SyncError::Mux(format!(
                "mkvmerge failed for {} ({}): {}",
                plan.target.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(plan.output.clone())
    }
}

/// Best-effort removal of a half-written output before the error surfaces.
fn remove_partial_output(path: &Path) {
    if path.exists() {
        if let Err(e) = std::fs::remove_file(path) {
            tracing::warn!("could not remove partial output {}: {}", path.display(), e);
        }
    }
}

/// Default output path for a target: `"<stem> [<sync>ms].mka"` next to the
/// target, or inside `output_folder` when one is configured. The embedded
/// value is the sync actually handed to the muxer.
pub fn default_output_path(
    target: &Path,
    offset: &OffsetSpec,
    output_folder: Option<&Path>,
) -> PathBuf {
    let stem = target
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    let name = format!("{} [{}ms].mka", stem, container_sync_ms(offset));

    match output_folder {
        Some(folder) => folder.join(name),
        None => target.with_file_name(name),
    }
}
