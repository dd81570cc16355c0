//! Subtitle database service integration.
//!
//! This module provides a `SubtitleService` trait over the remote subtitle
//! database, the `OpenSubtitlesClient` implementation, and the automatic
//! candidate selection logic.

mod client;
mod selector;
mod types;

pub use client::OpenSubtitlesClient;
pub use selector::{score_candidate, select, tokenize};
pub use types::*;
