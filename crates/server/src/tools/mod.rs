//! MCP tool implementations.
//!
//! This module contains all tools exposed by the songlink-mcp server.

pub mod cache;
pub mod track_link;

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;
use songlink_core::Error;

/// Render a tool output as pretty JSON text.
///
/// A value that cannot be serialized is a server fault, not bad input.
pub(crate) fn json_result<T: Serialize>(output: &T, what: &str) -> Result<CallToolResult, McpError> {
    let json =
        serde_json::to_string_pretty(output).map_err(|e| Error::Internal(format!("Failed to serialize {what}: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
