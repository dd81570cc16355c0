//! Types for the batch download pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::subtitles::{SubtitleCandidate, SubtitleError};

/// Summary of the subtitle chosen for a video file.
#[derive(Debug, Clone, Serialize)]
pub struct SelectedSubtitle {
    /// Service-side subtitle record id.
    pub subtitle_id: String,
    /// File id the download link was resolved from.
    pub file_id: u64,
    pub movie_name: String,
    pub language: Option<String>,
    pub release: String,
    pub download_count: u64,
    pub ai_translated: bool,
    pub machine_translated: bool,
    /// Whether the service matched the record by content fingerprint.
    pub fingerprint_match: bool,
    pub url: Option<String>,
}

impl SelectedSubtitle {
    pub fn new(candidate: &SubtitleCandidate, file_id: u64) -> Self {
        Self {
            subtitle_id: candidate.id.clone(),
            file_id,
            movie_name: candidate.attributes.feature_details.movie_name.clone(),
            language: candidate.attributes.language.clone(),
            release: candidate.attributes.release.clone(),
            download_count: candidate.attributes.download_count,
            ai_translated: candidate.attributes.ai_translated,
            machine_translated: candidate.attributes.machine_translated,
            fingerprint_match: candidate.attributes.moviehash_match,
            url: candidate.attributes.url.clone(),
        }
    }
}

/// How one file's trip through the pipeline ended.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileResult {
    /// A subtitle was downloaded next to the video.
    Downloaded {
        subtitle_path: PathBuf,
        subtitle: SelectedSubtitle,
    },
    /// The search returned no candidates to choose from.
    NoMatch,
    /// The pipeline failed; other files are unaffected.
    Failed { reason: String },
}

/// Outcome record for a single video file.
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub video: PathBuf,
    #[serde(flatten)]
    pub result: FileResult,
}

/// Aggregated result of a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    /// Number of files with a downloaded subtitle.
    pub fn downloaded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.result, FileResult::Downloaded { .. }))
            .count()
    }

    /// Number of files the search produced no candidates for.
    pub fn unmatched(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.result, FileResult::NoMatch))
            .count()
    }

    /// Number of files whose pipeline failed.
    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.result, FileResult::Failed { .. }))
            .count()
    }
}

/// Errors from a single file's pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Subtitle(#[from] SubtitleError),

    #[error("failed to write subtitle to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
