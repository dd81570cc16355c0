use serde::{Deserialize, Serialize};

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub opensubtitles: OpenSubtitlesConfig,
    #[serde(default)]
    pub download: DownloadConfig,
}

/// Subtitle service account and endpoint configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenSubtitlesConfig {
    /// Account username.
    pub username: String,
    /// Account password.
    pub password: String,
    /// API key issued for this consumer.
    pub api_key: String,
    /// Base URL (default: https://api.opensubtitles.com/api/v1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

/// Download preferences
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DownloadConfig {
    /// Comma-separated language preference list.
    #[serde(default = "default_languages")]
    pub languages: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            languages: default_languages(),
        }
    }
}

fn default_timeout() -> u32 {
    30
}

fn default_languages() -> String {
    "en,ar".to_string()
}
