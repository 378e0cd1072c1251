//! mkvmerge command options builder.
//!
//! Builds the command-line tokens for one edit plan. The edit is a pure
//! stream copy: mkvmerge adjusts the track's timestamps via `--sync` and
//! writes the compressed payload unchanged, so nothing is re-encoded.

use crate::models::EditPlan;

use super::delay::container_sync_ms;

/// Builder for mkvmerge command-line options.
///
/// Generates the string tokens that follow the mkvmerge executable name.
pub struct MkvmergeOptionsBuilder<'a> {
    plan: &'a EditPlan,
}

impl<'a> MkvmergeOptionsBuilder<'a> {
    /// Create a builder for one edit plan.
    pub fn new(plan: &'a EditPlan) -> Self {
        Self { plan }
    }

    /// Build the complete token list.
    pub fn build(&self) -> Vec<String> {
        let sync_ms = container_sync_ms(&self.plan.offset);

        vec![
            "-o".to_string(),
            self.plan.output.to_string_lossy().to_string(),
            "--sync".to_string(),
            format!("0:{sync_ms}"),
            "--default-track".to_string(),
            "0:yes".to_string(),
            self.plan.target.to_string_lossy().to_string(),
        ]
    }
}
