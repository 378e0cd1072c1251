//! Data models for syncaudio.
//!
//! Shared structures used across the pipeline:
//! - The error taxonomy (`SyncError`) and result alias
//! - Offset description (`OffsetSpec`, `Direction`)
//! - The per-target edit plan consumed by the output assembler

mod errors;
mod offset;

pub use errors::{SyncError, SyncResult};
pub use offset::{Direction, EditPlan, OffsetSpec};
