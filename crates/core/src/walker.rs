//! Video file discovery.
//!
//! Expands user-supplied paths into the list of video files to process.
//! Directories are scanned one level deep only; subdirectories are not
//! entered.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Recognized video file extensions.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi"];

/// Whether a path points at an existing file with a recognized video
/// extension.
pub fn is_video_file(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }

    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            VIDEO_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Expand a list of input paths into video files, in deterministic order.
///
/// For each path: a directory contributes its direct children that are
/// recognized video files (sorted by name, no recursion); a recognized video
/// file contributes itself; anything else is skipped silently.
pub fn collect_videos(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut videos = Vec::new();

    for path in paths {
        if path.is_dir() {
            let mut children: Vec<PathBuf> = match fs::read_dir(path) {
                Ok(entries) => entries
                    .filter_map(|entry| entry.ok().map(|e| e.path()))
                    .collect(),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to read directory");
                    continue;
                }
            };
            children.sort();

            for child in children {
                if is_video_file(&child) {
                    videos.push(child);
                }
            }
        } else if is_video_file(path) {
            videos.push(path.clone());
        } else {
            debug!(path = %path.display(), "Skipping unrecognized path");
        }
    }

    videos
}
