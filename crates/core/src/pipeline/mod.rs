//! Per-file download pipeline and batch orchestration.
//!
//! Each video runs the full Fingerprint -> Search -> Select -> Download
//! cycle independently; failures are captured per file and aggregated into a
//! batch report instead of aborting the remaining files.

mod runner;
mod types;

pub use runner::{subtitle_target, BatchRunner};
pub use types::*;
