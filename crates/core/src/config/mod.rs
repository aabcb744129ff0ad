//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (SONGLINK_*)
//! 2. TOML config file (if SONGLINK_CONFIG_FILE set)
//! 3. Built-in defaults

use std::num::NonZeroUsize;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (SONGLINK_*)
/// 2. TOML config file (if SONGLINK_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Maximum number of resolved descriptors kept in memory.
    ///
    /// Set via SONGLINK_CACHE_CAPACITY environment variable.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    /// Share one upstream resolution between concurrent lookups of the same descriptor.
    ///
    /// Set via SONGLINK_COALESCE_REQUESTS environment variable.
    #[serde(default = "default_true")]
    pub coalesce_requests: bool,

    /// Base URL of the metadata search API.
    ///
    /// Set via SONGLINK_SEARCH_BASE_URL environment variable.
    #[serde(default = "default_search_base_url")]
    pub search_base_url: String,

    /// Storefront country for the metadata search.
    ///
    /// Set via SONGLINK_SEARCH_COUNTRY environment variable.
    #[serde(default = "default_search_country")]
    pub search_country: String,

    /// Referer header sent with metadata search requests.
    ///
    /// Set via SONGLINK_SEARCH_REFERER environment variable.
    #[serde(default = "default_search_referer")]
    pub search_referer: String,

    /// Base URL of the link aggregation API.
    ///
    /// Set via SONGLINK_LINKS_BASE_URL environment variable.
    #[serde(default = "default_links_base_url")]
    pub links_base_url: String,

    /// Optional song.link API key.
    ///
    /// Set via SONGLINK_SONGLINK_API_KEY environment variable.
    #[serde(default)]
    pub songlink_api_key: Option<String>,

    /// Optional country hint passed to the link aggregation API.
    ///
    /// Set via SONGLINK_USER_COUNTRY environment variable.
    #[serde(default)]
    pub user_country: Option<String>,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via SONGLINK_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via SONGLINK_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_cache_capacity() -> usize {
    1000
}

fn default_search_base_url() -> String {
    "https://itunes.apple.com".into()
}

fn default_search_country() -> String {
    "RU".into()
}

fn default_search_referer() -> String {
    "https://odesli.co/".into()
}

fn default_links_base_url() -> String {
    "https://api.song.link".into()
}

fn default_user_agent() -> String {
    "songlink-mcp/0.1".into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_capacity: default_cache_capacity(),
            coalesce_requests: true,
            search_base_url: default_search_base_url(),
            search_country: default_search_country(),
            search_referer: default_search_referer(),
            links_base_url: default_links_base_url(),
            songlink_api_key: None,
            user_country: None,
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Cache capacity as a non-zero bound.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if `cache_capacity` is 0.
    pub fn capacity(&self) -> Result<NonZeroUsize, ConfigError> {
        NonZeroUsize::new(self.cache_capacity).ok_or_else(|| ConfigError::Invalid {
            field: "cache_capacity".into(),
            reason: "must be greater than 0".into(),
        })
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `SONGLINK_`
    /// 2. TOML file from `SONGLINK_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("SONGLINK_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("SONGLINK_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.cache_capacity, 1000);
        assert!(config.coalesce_requests);
        assert_eq!(config.search_base_url, "https://itunes.apple.com");
        assert_eq!(config.search_country, "RU");
        assert_eq!(config.search_referer, "https://odesli.co/");
        assert_eq!(config.links_base_url, "https://api.song.link");
        assert!(config.songlink_api_key.is_none());
        assert!(config.user_country.is_none());
        assert_eq!(config.user_agent, "songlink-mcp/0.1");
        assert_eq!(config.timeout_ms, 20_000);
    }

    #[test]
    fn test_timeout_duration() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(20_000));
    }

    #[test]
    fn test_capacity() {
        let config = AppConfig::default();
        assert_eq!(config.capacity().unwrap().get(), 1000);

        let config = AppConfig { cache_capacity: 0, ..Default::default() };
        assert!(matches!(config.capacity(), Err(ConfigError::Invalid { field, .. }) if field == "cache_capacity"));
    }

    #[test]
    fn test_load_from_env() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("SONGLINK_CACHE_CAPACITY", "50");
            jail.set_env("SONGLINK_COALESCE_REQUESTS", "false");
            jail.set_env("SONGLINK_SEARCH_COUNTRY", "US");

            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.cache_capacity, 50);
            assert!(!config.coalesce_requests);
            assert_eq!(config.search_country, "US");
            assert_eq!(config.links_base_url, "https://api.song.link");
            Ok(())
        });
    }

    #[test]
    fn test_load_from_toml_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "songlink.toml",
                r#"
                cache_capacity = 10
                user_country = "DE"
                "#,
            )?;
            jail.set_env("SONGLINK_CONFIG_FILE", "songlink.toml");
            jail.set_env("SONGLINK_CACHE_CAPACITY", "20");

            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.cache_capacity, 20);
            assert_eq!(config.user_country.as_deref(), Some("DE"));
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("SONGLINK_CACHE_CAPACITY", "0");
            assert!(matches!(AppConfig::load(), Err(ConfigError::Invalid { .. })));
            Ok(())
        });
    }
}
