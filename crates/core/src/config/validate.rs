use super::{Config, ConfigError};

/// Validate a loaded configuration before anything touches the network.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.opensubtitles.username.is_empty() {
        return Err(ConfigError::ValidationError(
            "opensubtitles.username must not be empty".to_string(),
        ));
    }
    if config.opensubtitles.password.is_empty() {
        return Err(ConfigError::ValidationError(
            "opensubtitles.password must not be empty".to_string(),
        ));
    }
    if config.opensubtitles.api_key.is_empty() {
        return Err(ConfigError::ValidationError(
            "opensubtitles.api_key must not be empty".to_string(),
        ));
    }
    if config.opensubtitles.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "opensubtitles.timeout_secs must be greater than zero".to_string(),
        ));
    }
    if config.download.languages.is_empty() {
        return Err(ConfigError::ValidationError(
            "download.languages must not be empty".to_string(),
        ));
    }

    Ok(())
}
