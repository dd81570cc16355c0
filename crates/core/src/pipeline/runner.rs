//! Batch driver: one Fingerprint -> Search -> Select -> Download cycle per
//! discovered video file.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{info, warn};

use crate::fingerprint::fingerprint_file;
use crate::subtitles::{select, SubtitleError, SubtitleQuery, SubtitleService};
use crate::walker;

use super::types::{BatchReport, FileOutcome, FileResult, PipelineError, SelectedSubtitle};

/// Destination path for a video's subtitle: `<stem>.srt` in the video's
/// directory. An existing file at that path is overwritten.
pub fn subtitle_target(video: &Path) -> PathBuf {
    video.with_extension("srt")
}

/// Drives the per-file pipeline over a batch of input paths.
pub struct BatchRunner {
    service: Arc<dyn SubtitleService>,
    languages: String,
}

impl BatchRunner {
    pub fn new(service: Arc<dyn SubtitleService>, languages: impl Into<String>) -> Self {
        Self {
            service,
            languages: languages.into(),
        }
    }

    /// Expand the input paths and process every discovered video in order.
    ///
    /// Files are fully independent: a failure is recorded in the report with
    /// the offending path and the batch moves on to the next file.
    pub async fn run(&self, inputs: &[PathBuf]) -> BatchReport {
        let started_at = Utc::now();
        let start = Instant::now();

        let videos = walker::collect_videos(inputs);
        info!(files = videos.len(), "Starting subtitle batch");

        let mut outcomes = Vec::with_capacity(videos.len());
        for video in videos {
            let result = match self.process_file(&video).await {
                Ok(result) => result,
                Err(e) => {
                    warn!(path = %video.display(), error = %e, "Pipeline failed for file");
                    FileResult::Failed {
                        reason: e.to_string(),
                    }
                }
            };
            outcomes.push(FileOutcome { video, result });
        }

        BatchReport {
            started_at,
            duration_ms: start.elapsed().as_millis() as u64,
            outcomes,
        }
    }

    /// Run the full pipeline for one video file.
    async fn process_file(&self, video: &Path) -> Result<FileResult, PipelineError> {
        let stem = video
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        // A file too small to fingerprint (or unreadable for hashing) can
        // still be matched by name; the condition is reported, not fatal.
        let fingerprint = match fingerprint_file(video) {
            Ok(fp) => Some(fp.to_string()),
            Err(e) => {
                warn!(path = %video.display(), error = %e, "No fingerprint, matching by name only");
                None
            }
        };

        let query = SubtitleQuery {
            fingerprint,
            query: Some(stem.clone()),
            imdb_id: None,
            languages: self.languages.clone(),
        };

        let candidates = self.service.search(&query).await?;

        let Some(candidate) = select(&stem, &candidates) else {
            info!(path = %video.display(), "No subtitle candidates found");
            return Ok(FileResult::NoMatch);
        };

        let file_id = candidate
            .primary_file_id()
            .ok_or_else(|| SubtitleError::NoFile {
                id: candidate.id.clone(),
            })?;
        let selected = SelectedSubtitle::new(candidate, file_id);

        let link = self.service.download_link(file_id).await?;
        let content = self.service.fetch(&link).await?;

        println!(
            ">> Downloading {} subtitles for {}",
            self.languages,
            video.display()
        );
        print_subtitle_info(&selected);

        let target = subtitle_target(video);
        tokio::fs::write(&target, &content)
            .await
            .map_err(|e| PipelineError::Write {
                path: target.clone(),
                source: e,
            })?;

        info!(path = %target.display(), bytes = content.len(), "Subtitle written");
        Ok(FileResult::Downloaded {
            subtitle_path: target,
            subtitle: selected,
        })
    }
}

/// Human-readable summary of the chosen subtitle, printed per file.
fn print_subtitle_info(sub: &SelectedSubtitle) {
    println!("Media Name: {}", sub.movie_name);
    println!(
        "file_id {}, hash match: {}",
        sub.file_id, sub.fingerprint_match
    );
    println!("- Language: {}", sub.language.as_deref().unwrap_or("?"));
    println!("- Release: {}", sub.release);
    println!("- Downloads: {}", sub.download_count);
    println!("- AI Translated: {}", sub.ai_translated);
    println!("- Machine Translated: {}", sub.machine_translated);
    println!("- URL: {}", sub.url.as_deref().unwrap_or("?"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtitle_target_replaces_extension() {
        assert_eq!(
            subtitle_target(Path::new("/library/Movie.2020.1080p.mkv")),
            PathBuf::from("/library/Movie.2020.1080p.srt")
        );
    }

    #[test]
    fn test_subtitle_target_stays_in_parent_directory() {
        let target = subtitle_target(Path::new("/a/b/video.mp4"));
        assert_eq!(target.parent(), Some(Path::new("/a/b")));
    }
}
