//! Automatic subtitle selection.
//!
//! Scores each candidate against the video's filename tokens, with a flat
//! bonus for records the service matched by content fingerprint, and keeps
//! the single best one. Entirely offline and deterministic.

use super::SubtitleCandidate;

/// Flat bonus for a candidate the service matched by fingerprint.
const FINGERPRINT_MATCH_BONUS: i32 = 10;

/// Split a release or file name into comparison tokens.
///
/// `-`, space, and `_` all normalize to `.` before splitting, so
/// "Movie 2020-1080p" and "Movie.2020.1080p" tokenize identically. Empty
/// tokens are kept; scoring depends on the exact token sequence.
pub fn tokenize(name: &str) -> Vec<String> {
    name.replace(['-', ' ', '_'], ".")
        .to_lowercase()
        .split('.')
        .map(str::to_string)
        .collect()
}

/// Score one candidate against the video's tokens.
///
/// Every equal (candidate token, video token) pair counts, over the full
/// cross product — repeated tokens score multiplicatively.
pub fn score_candidate(video_tokens: &[String], candidate: &SubtitleCandidate) -> i32 {
    let mut score = 0;

    if candidate.attributes.moviehash_match {
        score += FINGERPRINT_MATCH_BONUS;
    }

    let release_tokens = tokenize(&candidate.attributes.release);
    for release_token in &release_tokens {
        for video_token in video_tokens {
            if release_token == video_token {
                score += 1;
            }
        }
    }

    score
}

/// Pick the best-scoring candidate for the given video filename stem.
///
/// Ties keep the earliest candidate in input order. Returns `None` when the
/// list is empty; callers treat that as "no subtitle found" and skip the
/// download step.
pub fn select<'a>(
    video_stem: &str,
    candidates: &'a [SubtitleCandidate],
) -> Option<&'a SubtitleCandidate> {
    let video_tokens = tokenize(video_stem);

    let mut best: Option<(&SubtitleCandidate, i32)> = None;
    for candidate in candidates {
        let score = score_candidate(&video_tokens, candidate);
        if best.map_or(true, |(_, max)| score > max) {
            best = Some((candidate, score));
        }
    }

    best.map(|(candidate, _)| candidate)
}
