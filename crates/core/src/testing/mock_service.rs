//! Mock subtitle service for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::subtitles::{SubtitleCandidate, SubtitleError, SubtitleQuery, SubtitleService};

/// Default bytes served for any unconfigured download URL.
const DEFAULT_CONTENT: &[u8] = b"1\n00:00:01,000 --> 00:00:02,000\nHello.\n";

/// Mock implementation of the `SubtitleService` trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable search results
/// - Track search queries for assertions
/// - Simulate a one-shot failure
/// - Serve configurable content per download URL
pub struct MockSubtitleService {
    /// Configured results to return.
    results: Arc<RwLock<Vec<SubtitleCandidate>>>,
    /// Recorded search queries.
    searches: Arc<RwLock<Vec<SubtitleQuery>>>,
    /// If set, the next search will fail with this error (consumed once).
    next_error: Arc<RwLock<Option<SubtitleError>>>,
    /// Content served per download URL.
    content: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl Default for MockSubtitleService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSubtitleService {
    /// Create a new mock service with empty results.
    pub fn new() -> Self {
        Self {
            results: Arc::new(RwLock::new(Vec::new())),
            searches: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            content: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Set the results to return for subsequent searches.
    pub async fn set_results(&self, results: Vec<SubtitleCandidate>) {
        *self.results.write().await = results;
    }

    /// Configure the next search to fail with the given error.
    pub async fn set_next_error(&self, error: SubtitleError) {
        *self.next_error.write().await = Some(error);
    }

    /// Serve specific bytes for a file id's download URL.
    pub async fn set_content(&self, file_id: u64, bytes: &[u8]) {
        self.content
            .write()
            .await
            .insert(Self::link_for(file_id), bytes.to_vec());
    }

    /// Get recorded search queries.
    pub async fn recorded_searches(&self) -> Vec<SubtitleQuery> {
        self.searches.read().await.clone()
    }

    /// The deterministic download URL the mock resolves a file id to.
    pub fn link_for(file_id: u64) -> String {
        format!("https://mock.subs.test/download/{}", file_id)
    }
}

#[async_trait]
impl SubtitleService for MockSubtitleService {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search(
        &self,
        query: &SubtitleQuery,
    ) -> Result<Vec<SubtitleCandidate>, SubtitleError> {
        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        self.searches.write().await.push(query.clone());
        Ok(self.results.read().await.clone())
    }

    async fn download_link(&self, file_id: u64) -> Result<String, SubtitleError> {
        Ok(Self::link_for(file_id))
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, SubtitleError> {
        Ok(self
            .content
            .read()
            .await
            .get(url)
            .cloned()
            .unwrap_or_else(|| DEFAULT_CONTENT.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[tokio::test]
    async fn test_search_returns_configured_results() {
        let service = MockSubtitleService::new();
        service
            .set_results(vec![fixtures::candidate("1", "Movie.2020", false, 11)])
            .await;

        let results = service.search(&SubtitleQuery::default()).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "1");
    }

    #[tokio::test]
    async fn test_search_records_queries() {
        let service = MockSubtitleService::new();

        let query = SubtitleQuery {
            query: Some("Movie".to_string()),
            languages: "en".to_string(),
            ..Default::default()
        };
        service.search(&query).await.unwrap();

        let recorded = service.recorded_searches().await;
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].query.as_deref(), Some("Movie"));
    }

    #[tokio::test]
    async fn test_error_is_consumed_once() {
        let service = MockSubtitleService::new();
        service
            .set_next_error(SubtitleError::Timeout)
            .await;

        assert!(service.search(&SubtitleQuery::default()).await.is_err());
        assert!(service.search(&SubtitleQuery::default()).await.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_serves_configured_content() {
        let service = MockSubtitleService::new();
        service.set_content(7, b"subtitle body").await;

        let link = service.download_link(7).await.unwrap();
        let bytes = service.fetch(&link).await.unwrap();
        assert_eq!(bytes, b"subtitle body");
    }

    #[tokio::test]
    async fn test_fetch_has_default_content() {
        let service = MockSubtitleService::new();
        let bytes = service.fetch("https://anywhere.test/x").await.unwrap();
        assert!(!bytes.is_empty());
    }
}
