//! Types for the subtitle search and download system.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Query parameters for a subtitle search.
///
/// At least one of `fingerprint`, `query`, or `imdb_id` should be supplied;
/// an empty query set is legal and returns whatever the service considers a
/// default result.
#[derive(Debug, Clone, Default)]
pub struct SubtitleQuery {
    /// Content fingerprint for exact-match lookup.
    pub fingerprint: Option<String>,
    /// Free-text title query (typically the video filename stem).
    pub query: Option<String>,
    /// External identifier (IMDb).
    pub imdb_id: Option<String>,
    /// Comma-separated language preference list (e.g. "en,ar").
    pub languages: String,
}

/// One subtitle record returned by a search.
///
/// The record is owned transiently by the search -> select -> download chain
/// for a single file and never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtitleCandidate {
    /// Service-side record identifier.
    pub id: String,
    pub attributes: SubtitleAttributes,
}

impl SubtitleCandidate {
    /// The file id used for download-link resolution, if the record has one.
    pub fn primary_file_id(&self) -> Option<u64> {
        self.attributes.files.first().map(|f| f.file_id)
    }
}

/// Descriptive metadata carried by a subtitle record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtitleAttributes {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub download_count: u64,
    #[serde(default)]
    pub ai_translated: bool,
    #[serde(default)]
    pub machine_translated: bool,
    /// True when the service matched this record by content fingerprint.
    #[serde(default)]
    pub moviehash_match: bool,
    /// Release name the subtitle was cut for.
    #[serde(default)]
    pub release: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub feature_details: FeatureDetails,
    #[serde(default)]
    pub files: Vec<SubtitleFile>,
}

/// The movie or episode a subtitle record belongs to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureDetails {
    #[serde(default)]
    pub movie_name: String,
}

/// A downloadable file attached to a subtitle record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtitleFile {
    pub file_id: u64,
    #[serde(default)]
    pub file_name: Option<String>,
}

/// Errors that can occur against the subtitle service.
#[derive(Debug, Error)]
pub enum SubtitleError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("request timeout")]
    Timeout,

    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("api error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("failed to parse response: {0}")]
    ParseError(String),

    #[error("subtitle record {id} carries no downloadable file")]
    NoFile { id: String },
}

/// Trait for subtitle database backends.
#[async_trait]
pub trait SubtitleService: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Search for subtitle candidates, in the service's order
    /// (descending by vote count).
    async fn search(
        &self,
        query: &SubtitleQuery,
    ) -> Result<Vec<SubtitleCandidate>, SubtitleError>;

    /// Resolve a candidate's file id to a one-time download URL.
    async fn download_link(&self, file_id: u64) -> Result<String, SubtitleError>;

    /// Fetch the raw subtitle content from a download URL, fully buffered.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, SubtitleError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_deserializes_from_api_shape() {
        let json = r#"{
            "id": "9000",
            "type": "subtitle",
            "attributes": {
                "subtitle_id": "9000",
                "language": "en",
                "download_count": 697,
                "ai_translated": false,
                "machine_translated": false,
                "moviehash_match": true,
                "release": "Movie.2020.1080p.WEB",
                "url": "https://www.opensubtitles.com/en/subtitles/movie",
                "feature_details": {
                    "feature_id": 501,
                    "movie_name": "Movie",
                    "year": 2020
                },
                "files": [
                    { "file_id": 111, "cd_number": 1, "file_name": "movie.srt" }
                ]
            }
        }"#;

        let candidate: SubtitleCandidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.id, "9000");
        assert!(candidate.attributes.moviehash_match);
        assert_eq!(candidate.attributes.release, "Movie.2020.1080p.WEB");
        assert_eq!(candidate.attributes.feature_details.movie_name, "Movie");
        assert_eq!(candidate.primary_file_id(), Some(111));
    }

    #[test]
    fn test_candidate_tolerates_sparse_attributes() {
        // Records without hash-match info or files still deserialize.
        let json = r#"{
            "id": "1",
            "attributes": {
                "release": "Some.Release"
            }
        }"#;

        let candidate: SubtitleCandidate = serde_json::from_str(json).unwrap();
        assert!(!candidate.attributes.moviehash_match);
        assert!(candidate.attributes.files.is_empty());
        assert_eq!(candidate.primary_file_id(), None);
    }

    #[test]
    fn test_primary_file_id_is_first_file() {
        let json = r#"{
            "id": "1",
            "attributes": {
                "release": "r",
                "files": [
                    { "file_id": 5 },
                    { "file_id": 6 }
                ]
            }
        }"#;

        let candidate: SubtitleCandidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.primary_file_id(), Some(5));
    }
}
