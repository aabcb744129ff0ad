//! song.link (Odesli) API client.
//!
//! Second stage of track resolution: maps a platform-specific URL to the
//! canonical cross-platform song.link page.
//!
//! ### API
//!
//! - **Endpoint**: `GET https://api.song.link/v1-alpha.1/links?url=<percent-encoded URL>`
//! - **Authentication**: optional `key` query parameter; without it the
//!   public rate limit applies.
//! - **Result**: the `pageUrl` field; absent or empty means no link.

pub mod response;

pub use response::SongLinkResponse;

use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::Serialize;
use songlink_core::AppConfig;
use std::time::Duration;

use crate::http;
use crate::resolver::LinkAggregator;
use crate::UpstreamError;

/// Default base URL for the song.link API.
const DEFAULT_BASE_URL: &str = "https://api.song.link";

/// Path of the links endpoint, relative to the base URL.
const LINKS_PATH: &str = "v1-alpha.1/links";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "songlink-mcp/0.1";

/// song.link client configuration.
#[derive(Debug, Clone)]
pub struct SongLinkConfig {
    /// Base URL (default: https://api.song.link).
    pub base_url: String,
    /// API key, sent as `key` when set.
    pub api_key: Option<String>,
    /// Country hint, sent as `userCountry` when set.
    pub user_country: Option<String>,
    /// Request timeout (default: 20s).
    pub timeout: Duration,
    /// User-agent string (default: songlink-mcp/0.x).
    pub user_agent: String,
}

impl Default for SongLinkConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            user_country: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl From<&AppConfig> for SongLinkConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            base_url: config.links_base_url.clone(),
            api_key: config.songlink_api_key.clone(),
            user_country: config.user_country.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct LinksQuery<'a> {
    url: &'a str,
    #[serde(rename = "userCountry", skip_serializing_if = "Option::is_none")]
    user_country: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<&'a str>,
}

/// song.link API client.
#[derive(Debug, Clone)]
pub struct SongLinkClient {
    http: reqwest::Client,
    config: SongLinkConfig,
}

impl SongLinkClient {
    /// Create a new song.link client with the given configuration.
    pub fn new(config: SongLinkConfig) -> Result<Self, UpstreamError> {
        let http = http::build_client(&config.user_agent, config.timeout)?;
        Ok(Self { http, config })
    }

    /// Look up the cross-platform links for a platform URL.
    pub async fn links(&self, platform_url: &str) -> Result<SongLinkResponse, UpstreamError> {
        tracing::debug!("resolving song.link page for {}", platform_url);

        let response: SongLinkResponse = http::get_json(self.request(platform_url), "song.link").await?;

        tracing::debug!(
            "song.link entity {:?} (country {:?}), page {:?}",
            response.entity_unique_id,
            response.user_country,
            response.page_url
        );

        Ok(response)
    }

    fn request(&self, platform_url: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), LINKS_PATH);
        let query = LinksQuery {
            url: platform_url,
            user_country: self.config.user_country.as_deref(),
            key: self.config.api_key.as_deref(),
        };
        self.http.get(url).query(&query)
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &SongLinkConfig {
        &self.config
    }
}

#[async_trait]
impl LinkAggregator for SongLinkClient {
    async fn page_url(&self, platform_url: &str) -> Result<Option<String>, UpstreamError> {
        Ok(self.links(platform_url).await?.into_page_url())
    }
}
