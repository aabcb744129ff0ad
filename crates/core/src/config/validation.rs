//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Upper bound on cache entries accepted from configuration.
const MAX_CACHE_CAPACITY: usize = 1_000_000;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `cache_capacity` is 0 or exceeds 1,000,000
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `user_agent` or `search_country` is empty
    /// - either base URL is not an absolute http(s) URL
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.capacity()?;
        if self.cache_capacity > MAX_CACHE_CAPACITY {
            return Err(ConfigError::Invalid {
                field: "cache_capacity".into(),
                reason: format!("must not exceed {MAX_CACHE_CAPACITY}"),
            });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.search_country.is_empty() {
            return Err(ConfigError::Invalid { field: "search_country".into(), reason: "must not be empty".into() });
        }

        validate_base_url("search_base_url", &self.search_base_url)?;
        validate_base_url("links_base_url", &self.links_base_url)?;

        if self.songlink_api_key.is_none() {
            tracing::debug!("no song.link API key configured; using the unauthenticated rate limit");
        }

        Ok(())
    }
}

fn validate_base_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = url::Url::parse(value)
        .map_err(|e| ConfigError::Invalid { field: field.into(), reason: format!("not a valid URL: {e}") })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid { field: field.into(), reason: "scheme must be http or https".into() });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_capacity_zero() {
        let config = AppConfig { cache_capacity: 0, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "cache_capacity"));
    }

    #[test]
    fn test_validate_capacity_exceeds_limit() {
        let config = AppConfig { cache_capacity: MAX_CACHE_CAPACITY + 1, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "cache_capacity"));
    }

    #[test]
    fn test_validate_timeout_too_small() {
        let config = AppConfig { timeout_ms: 50, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "timeout_ms"));
    }

    #[test]
    fn test_validate_timeout_exceeds_limit() {
        let config = AppConfig { timeout_ms: 301_000, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "timeout_ms"));
    }

    #[test]
    fn test_validate_empty_user_agent() {
        let config = AppConfig { user_agent: String::new(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "user_agent"));
    }

    #[test]
    fn test_validate_empty_country() {
        let config = AppConfig { search_country: String::new(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "search_country"));
    }

    #[test]
    fn test_validate_bad_base_urls() {
        let config = AppConfig { search_base_url: "not a url".into(), ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field, .. }) if field == "search_base_url"));

        let config = AppConfig { links_base_url: "ftp://api.song.link".into(), ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field, .. }) if field == "links_base_url"));
    }

    #[test]
    fn test_validate_edge_case_values() {
        let config = AppConfig { cache_capacity: 1, timeout_ms: 100, ..Default::default() };
        assert!(config.validate().is_ok());

        let config = AppConfig { cache_capacity: MAX_CACHE_CAPACITY, timeout_ms: 300_000, ..Default::default() };
        assert!(config.validate().is_ok());
    }
}
