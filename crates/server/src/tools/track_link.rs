//! track_link tool implementation.
//!
//! Resolves a track descriptor through the shared track link cache.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use songlink_core::{Error, Resolve, ResolutionResult, TrackLinkCache};

/// Input parameters for track_link tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TrackLinkParams {
    /// Track descriptor, conventionally "<artist> - <title>". Used verbatim.
    pub descriptor: String,
}

/// Whether a link was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LinkStatus {
    Found,
    NotFound,
}

/// Output structure for track_link tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TrackLinkOutput {
    /// The descriptor that was looked up.
    pub descriptor: String,
    /// Lookup outcome.
    pub status: LinkStatus,
    /// Cross-platform song.link page (only when found).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl TrackLinkOutput {
    fn new(descriptor: String, result: ResolutionResult) -> Self {
        match result {
            ResolutionResult::Found(link) => Self { descriptor, status: LinkStatus::Found, link: Some(link) },
            ResolutionResult::NotFound => Self { descriptor, status: LinkStatus::NotFound, link: None },
        }
    }
}

/// Implementation of the track_link tool.
///
/// Upstream failures become MCP errors carrying the failure detail; they are
/// never reported as `not_found`.
pub async fn track_link_impl<R: Resolve + 'static>(
    cache: &TrackLinkCache<R>, params: TrackLinkParams,
) -> Result<CallToolResult, McpError> {
    if params.descriptor.is_empty() {
        return Err(Error::InvalidInput("descriptor cannot be empty".into()).into());
    }

    let result = cache.lookup(&params.descriptor).await?;
    let output = TrackLinkOutput::new(params.descriptor, result);

    super::json_result(&output, "track link")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use songlink_core::CacheOptions;

    struct FixedResolver(Result<ResolutionResult, Error>);

    #[async_trait]
    impl Resolve for FixedResolver {
        async fn resolve(&self, _descriptor: &str) -> Result<ResolutionResult, Error> {
            self.0.clone()
        }
    }

    fn cache(answer: Result<ResolutionResult, Error>) -> TrackLinkCache<FixedResolver> {
        TrackLinkCache::new(FixedResolver(answer), CacheOptions::default())
    }

    fn text_of(result: &CallToolResult) -> String {
        serde_json::to_string(result).unwrap()
    }

    #[tokio::test]
    async fn test_empty_descriptor() {
        let cache = cache(Ok(ResolutionResult::NotFound));
        let params = TrackLinkParams { descriptor: String::new() };

        let err = track_link_impl(&cache, params).await.unwrap_err();
        assert_eq!(err.code.0, -32602);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_found() {
        let cache = cache(Ok(ResolutionResult::Found("https://song.link/abc".into())));
        let params = TrackLinkParams { descriptor: "Daft Punk - One More Time".into() };

        let result = track_link_impl(&cache, params).await.unwrap();
        let text = text_of(&result);
        assert!(text.contains("https://song.link/abc"));
        assert!(text.contains("found"));
    }

    #[tokio::test]
    async fn test_not_found() {
        let cache = cache(Ok(ResolutionResult::NotFound));
        let params = TrackLinkParams { descriptor: "N/A - N/A".into() };

        let result = track_link_impl(&cache, params).await.unwrap();
        assert!(text_of(&result).contains("not_found"));
    }

    #[tokio::test]
    async fn test_upstream_error_is_reported() {
        let cache = cache(Err(Error::SearchFailed("HTTP error: 503".into())));
        let params = TrackLinkParams { descriptor: "Daft Punk - One More Time".into() };

        let err = track_link_impl(&cache, params).await.unwrap_err();
        assert_eq!(err.code.0, -32020);
        assert!(err.message.contains("503"));
        assert!(cache.is_empty().await);
    }

    #[test]
    fn test_output_serialization() {
        let output = TrackLinkOutput::new("a - b".into(), ResolutionResult::NotFound);
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["status"], "not_found");
        assert!(value.get("link").is_none());

        let output = TrackLinkOutput::new("a - b".into(), ResolutionResult::Found("https://song.link/x".into()));
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["status"], "found");
        assert_eq!(value["link"], "https://song.link/x");
    }
}
