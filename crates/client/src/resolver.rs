//! Two-stage track link resolution.
//!
//! Stage A searches for the descriptor and yields a platform URL. Stage B
//! hands that URL to the link aggregator for a cross-platform page. Stage B
//! only accepts URLs from recognized platforms, so the stages always run in
//! order and B is skipped whenever A finds nothing usable.

use async_trait::async_trait;
use songlink_core::{AppConfig, Error, Resolve, ResolutionResult};
use std::time::Instant;

use crate::itunes::{ItunesClient, ItunesConfig};
use crate::songlink::{SongLinkClient, SongLinkConfig};
use crate::UpstreamError;

/// Stage A: free-text search for a platform URL.
#[async_trait]
pub trait TrackSearch: Send + Sync {
    /// URL of the best match for `term`, or `None` when there is no usable match.
    async fn find_track_url(&self, term: &str) -> Result<Option<String>, UpstreamError>;
}

/// Stage B: platform URL to cross-platform page.
#[async_trait]
pub trait LinkAggregator: Send + Sync {
    /// Page URL for `platform_url`, or `None` when the aggregator returned none.
    async fn page_url(&self, platform_url: &str) -> Result<Option<String>, UpstreamError>;
}

/// Resolver chaining a [`TrackSearch`] and a [`LinkAggregator`].
#[derive(Debug, Clone)]
pub struct TrackResolver<S = ItunesClient, L = SongLinkClient> {
    search: S,
    links: L,
}

impl<S, L> TrackResolver<S, L> {
    pub fn new(search: S, links: L) -> Self {
        Self { search, links }
    }
}

impl TrackResolver {
    /// Build the iTunes → song.link resolver from application config.
    pub fn from_config(config: &AppConfig) -> Result<Self, UpstreamError> {
        let search = ItunesClient::new(ItunesConfig::from(config))?;
        let links = SongLinkClient::new(SongLinkConfig::from(config))?;
        Ok(Self::new(search, links))
    }
}

#[async_trait]
impl<S, L> Resolve for TrackResolver<S, L>
where
    S: TrackSearch,
    L: LinkAggregator,
{
    async fn resolve(&self, descriptor: &str) -> Result<ResolutionResult, Error> {
        let start = Instant::now();

        let track_url = self
            .search
            .find_track_url(descriptor)
            .await
            .map_err(|e| Error::SearchFailed(e.to_string()))?
            .filter(|url| !url.is_empty());

        let Some(track_url) = track_url else {
            tracing::debug!(descriptor, "no usable search match");
            return Ok(ResolutionResult::NotFound);
        };

        let page_url = self
            .links
            .page_url(&track_url)
            .await
            .map_err(|e| Error::LinkFailed(e.to_string()))?;

        let result = ResolutionResult::from_link(page_url);

        tracing::debug!(
            descriptor,
            track_url = %track_url,
            found = result.is_found(),
            "resolved track link in {:?}",
            start.elapsed()
        );

        Ok(result)
    }
}
