//! OpenSubtitles REST API client.
//!
//! Authentication happens once, at construction: `login` performs the token
//! exchange and returns a client that carries the bearer token for its whole
//! lifetime. There is no refresh — a token outlives any single batch run.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::OpenSubtitlesConfig;

use super::{SubtitleCandidate, SubtitleError, SubtitleQuery, SubtitleService};

const DEFAULT_BASE_URL: &str = "https://api.opensubtitles.com/api/v1";

/// Authenticated OpenSubtitles API client.
pub struct OpenSubtitlesClient {
    client: Client,
    base_url: String,
    api_key: String,
    /// Bearer token obtained at login, valid for the process lifetime.
    token: String,
}

impl OpenSubtitlesClient {
    /// Perform the authentication exchange and return a ready client.
    ///
    /// A response without a token field is an authentication failure carrying
    /// the raw response body; there is no retry and no distinction between
    /// bad credentials and an unreachable service at this layer.
    pub async fn login(config: OpenSubtitlesConfig) -> Result<Self, SubtitleError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .map_err(|e| SubtitleError::ConnectionFailed(e.to_string()))?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let url = format!("{}/login", base_url);
        debug!("Logging in to subtitle service at {}", base_url);

        let payload = serde_json::json!({
            "username": config.username,
            "password": config.password,
        });

        let response = client
            .post(&url)
            .header("Api-Key", &config.api_key)
            .header("Accept", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(SubtitleError::AuthenticationFailed(format!(
                "HTTP {}: {}",
                status,
                truncate(&body)
            )));
        }

        let login: LoginResponse = serde_json::from_str(&body)
            .map_err(|e| SubtitleError::ParseError(format!("login response: {}", e)))?;

        match login.token {
            Some(token) if !token.is_empty() => {
                debug!("Subtitle service login successful");
                Ok(Self {
                    client,
                    base_url,
                    api_key: config.api_key,
                    token,
                })
            }
            _ => Err(SubtitleError::AuthenticationFailed(format!(
                "no token in login response: {}",
                truncate(&body)
            ))),
        }
    }

    /// Query parameters for a search.
    ///
    /// The hash, title, and identifier filters are only included when set.
    fn search_params(query: &SubtitleQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("languages", query.languages.clone()),
            ("order_by", "votes".to_string()),
            ("order_direction", "desc".to_string()),
        ];

        if let Some(imdb_id) = &query.imdb_id {
            params.push(("imdb_id", imdb_id.clone()));
        }
        if let Some(fingerprint) = &query.fingerprint {
            params.push(("moviehash", fingerprint.clone()));
        }
        if let Some(text) = &query.query {
            params.push(("query", text.clone()));
        }

        params
    }
}

#[async_trait]
impl SubtitleService for OpenSubtitlesClient {
    fn name(&self) -> &str {
        "opensubtitles"
    }

    async fn search(
        &self,
        query: &SubtitleQuery,
    ) -> Result<Vec<SubtitleCandidate>, SubtitleError> {
        let url = format!("{}/subtitles", self.base_url);

        debug!(
            fingerprint = ?query.fingerprint,
            title = ?query.query,
            languages = %query.languages,
            "Searching subtitles"
        );

        let response = self
            .client
            .get(&url)
            .header("Api-Key", &self.api_key)
            .header("Accept", "application/json")
            .header("Authorization", format!("Bearer {}", self.token))
            .query(&Self::search_params(query))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SubtitleError::ApiError {
                status: status.as_u16(),
                message: truncate(&body),
            });
        }

        let search: SearchResponse = response
            .json()
            .await
            .map_err(|e| SubtitleError::ParseError(format!("search response: {}", e)))?;

        debug!(results = search.data.len(), "Subtitle search complete");
        Ok(search.data)
    }

    async fn download_link(&self, file_id: u64) -> Result<String, SubtitleError> {
        let url = format!("{}/download", self.base_url);

        debug!(file_id, "Resolving download link");

        let payload = serde_json::json!({ "file_id": file_id });

        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .header("Accept", "application/json")
            // The download endpoint takes the bare token, no "Bearer" scheme.
            .header("Authorization", &self.token)
            .json(&payload)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SubtitleError::ApiError {
                status: status.as_u16(),
                message: truncate(&body),
            });
        }

        let download: DownloadResponse = response
            .json()
            .await
            .map_err(|e| SubtitleError::ParseError(format!("download response: {}", e)))?;

        download
            .link
            .ok_or_else(|| SubtitleError::ParseError("no link in download response".to_string()))
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, SubtitleError> {
        debug!(url, "Fetching subtitle content");

        let response = self.client.get(url).send().await.map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubtitleError::ApiError {
                status: status.as_u16(),
                message: "download fetch failed".to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SubtitleError::ConnectionFailed(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}

fn transport_error(e: reqwest::Error) -> SubtitleError {
    if e.is_timeout() {
        SubtitleError::Timeout
    } else if e.is_connect() {
        SubtitleError::ConnectionFailed(e.to_string())
    } else {
        SubtitleError::ApiError {
            status: e.status().map(|s| s.as_u16()).unwrap_or(0),
            message: e.to_string(),
        }
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(200).collect()
}

// ============================================================================
// API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<SubtitleCandidate>,
}

#[derive(Debug, Deserialize)]
struct DownloadResponse {
    link: Option<String>,
}
