//! cache_stats tool implementation.
//!
//! Reports the current state of the track link cache without touching it.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use songlink_core::{CacheStats, TrackLinkCache};

use crate::tools::json_result;

/// Implementation of the cache_stats tool.
pub async fn stats_impl<R>(cache: &TrackLinkCache<R>) -> Result<CallToolResult, McpError> {
    let stats: CacheStats = cache.stats().await;

    json_result(&stats, "cache stats")
}
