//! iTunes Search API client.
//!
//! First stage of track resolution: turns a free-text track descriptor into a
//! platform URL that the link aggregation API accepts.
//!
//! ### API
//!
//! - **Endpoint**: `GET https://itunes.apple.com/search?term=…&country=RU&entity=song`
//! - **Headers**: a fixed `Referer` (`https://odesli.co/`) the endpoint expects
//!   from song.link traffic.
//! - **Selection**: only the first result is used; a missing or empty
//!   `trackViewUrl` there means no match.

pub mod request;
pub mod response;

pub use request::{Entity, SearchRequest};
pub use response::{ItunesSearchResponse, ItunesTrack};

use async_trait::async_trait;
use reqwest::{RequestBuilder, header};
use songlink_core::AppConfig;
use std::time::Duration;

use crate::http;
use crate::resolver::TrackSearch;
use crate::UpstreamError;

/// Default base URL for the iTunes Search API.
const DEFAULT_BASE_URL: &str = "https://itunes.apple.com";

/// Default storefront country.
const DEFAULT_COUNTRY: &str = "RU";

/// Referer sent with every search request.
const DEFAULT_REFERER: &str = "https://odesli.co/";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "songlink-mcp/0.1";

/// iTunes client configuration.
#[derive(Debug, Clone)]
pub struct ItunesConfig {
    /// Base URL (default: https://itunes.apple.com).
    pub base_url: String,
    /// Storefront country (default: RU).
    pub country: String,
    /// Referer header value (default: https://odesli.co/).
    pub referer: String,
    /// Request timeout (default: 20s).
    pub timeout: Duration,
    /// User-agent string (default: songlink-mcp/0.x).
    pub user_agent: String,
}

impl Default for ItunesConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            referer: DEFAULT_REFERER.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl From<&AppConfig> for ItunesConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            base_url: config.search_base_url.clone(),
            country: config.search_country.clone(),
            referer: config.search_referer.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// iTunes Search API client.
#[derive(Debug, Clone)]
pub struct ItunesClient {
    http: reqwest::Client,
    config: ItunesConfig,
}

impl ItunesClient {
    /// Create a new iTunes client with the given configuration.
    pub fn new(config: ItunesConfig) -> Result<Self, UpstreamError> {
        let http = http::build_client(&config.user_agent, config.timeout)?;
        Ok(Self { http, config })
    }

    /// Execute a search query.
    ///
    /// Fails on transport errors, non-2xx statuses and bodies without a
    /// `results` array. An empty `results` array is a successful response.
    pub async fn search(&self, req: &SearchRequest) -> Result<ItunesSearchResponse, UpstreamError> {
        tracing::debug!("searching iTunes: term={}", req.term);

        let response: ItunesSearchResponse = http::get_json(self.request(req), "iTunes").await?;

        tracing::debug!("iTunes returned {} results", response.results.len());
        if let Some(top) = response.results.first() {
            tracing::debug!("iTunes top result: {:?} - {:?}", top.artist_name, top.track_name);
        }

        Ok(response)
    }

    fn request(&self, req: &SearchRequest) -> RequestBuilder {
        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));
        self.http.get(url).header(header::REFERER, &self.config.referer).query(req)
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &ItunesConfig {
        &self.config
    }
}

#[async_trait]
impl TrackSearch for ItunesClient {
    async fn find_track_url(&self, term: &str) -> Result<Option<String>, UpstreamError> {
        let req = SearchRequest::song(term, self.config.country.as_str());
        Ok(self.search(&req).await?.top_track_url())
    }
}
