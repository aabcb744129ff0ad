//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use crate::tools::cache::stats_impl;
use crate::tools::track_link::{TrackLinkParams, track_link_impl};

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};
use songlink_client::TrackResolver;
use songlink_core::TrackLinkCache;

/// The main MCP server handler for songlink-mcp.
///
/// Holds the process-wide track link cache; clones share it.
#[derive(Clone)]
pub struct SongLinkServer {
    cache: TrackLinkCache<TrackResolver>,
    tool_router: ToolRouter<Self>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl SongLinkServer {
    /// Create a new server handler around an already constructed cache.
    pub fn new(cache: TrackLinkCache<TrackResolver>) -> Self {
        Self { cache, tool_router: Self::tool_router() }
    }

    /// Resolve a track descriptor to a cross-platform song.link page.
    #[tool(
        description = "Find a cross-platform song.link page for a track. Input is \"<artist> - <title>\". Returns status found/not_found and the link."
    )]
    async fn track_link(&self, params: Parameters<TrackLinkParams>) -> Result<CallToolResult, McpError> {
        track_link_impl(&self.cache, params.0).await
    }

    /// Report track link cache statistics.
    #[tool(description = "Report track link cache statistics: entries, capacity, in-flight lookups, hits and misses.")]
    async fn cache_stats(&self) -> Result<CallToolResult, McpError> {
        stats_impl(&self.cache).await
    }
}

impl ServerHandler for SongLinkServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "songlink-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
