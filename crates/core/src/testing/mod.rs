//! Testing utilities and mock implementations.
//!
//! Provides a mock `SubtitleService` so the pipeline can be exercised
//! end-to-end without real credentials or network access.

mod mock_service;

pub use mock_service::MockSubtitleService;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::subtitles::{
        FeatureDetails, SubtitleAttributes, SubtitleCandidate, SubtitleFile,
    };

    /// Create a test subtitle candidate with reasonable defaults.
    pub fn candidate(
        id: &str,
        release: &str,
        moviehash_match: bool,
        file_id: u64,
    ) -> SubtitleCandidate {
        SubtitleCandidate {
            id: id.to_string(),
            attributes: SubtitleAttributes {
                language: Some("en".to_string()),
                download_count: 100,
                ai_translated: false,
                machine_translated: false,
                moviehash_match,
                release: release.to_string(),
                url: Some(format!("https://subs.test/{}", id)),
                feature_details: FeatureDetails {
                    movie_name: "Test Movie".to_string(),
                },
                files: vec![SubtitleFile {
                    file_id,
                    file_name: Some(format!("{}.srt", release)),
                }],
            },
        }
    }

    /// A candidate without any downloadable file attached.
    pub fn candidate_without_files(id: &str, release: &str) -> SubtitleCandidate {
        let mut candidate = candidate(id, release, false, 0);
        candidate.attributes.files.clear();
        candidate
    }
}
