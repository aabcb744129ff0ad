//! Unified error types for songlink-mcp.
//!
//! A "not found" answer from upstream is a [`crate::ResolutionResult`], never
//! an error. Everything here is something that went wrong and must not be
//! cached.

use rmcp::model::{ErrorCode, ErrorData as McpError};

use crate::config::ConfigError;

/// Unified error types for the songlink-mcp server.
///
/// Cloneable so that concurrent callers waiting on the same lookup can each
/// receive the failure.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty descriptor).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Metadata search request failed (transport, status or parse).
    #[error("SEARCH_FAILED: {0}")]
    SearchFailed(String),

    /// Link aggregation request failed (transport, status or parse).
    #[error("LINK_FAILED: {0}")]
    LinkFailed(String),

    /// Configuration could not be loaded or is invalid.
    #[error("CONFIG_ERROR: {0}")]
    Config(String),

    /// Server-side fault unrelated to the caller's input or upstream.
    #[error("INTERNAL_ERROR: {0}")]
    Internal(String),
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::SearchFailed(_) => (-32020, err.to_string()),
            Error::LinkFailed(_) => (-32021, err.to_string()),
            Error::Config(msg) => (-32603, msg.clone()),
            Error::Internal(_) => (-32603, err.to_string()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::SearchFailed("HTTP error: 503".to_string());
        assert!(err.to_string().contains("SEARCH_FAILED"));
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_error_to_mcp_error() {
        let mcp_err: McpError = Error::InvalidInput("descriptor cannot be empty".into()).into();
        assert_eq!(mcp_err.code.0, -32602);

        let mcp_err: McpError = Error::LinkFailed("request timeout".into()).into();
        assert_eq!(mcp_err.code.0, -32021);
        assert!(mcp_err.message.contains("request timeout"));
    }

    #[test]
    fn test_internal_error_code() {
        let mcp_err: McpError = Error::Internal("Failed to serialize cache stats".into()).into();
        assert_eq!(mcp_err.code.0, -32603);
        assert!(mcp_err.message.starts_with("INTERNAL_ERROR"));
    }

    #[test]
    fn test_from_config_error() {
        let err: Error = ConfigError::Invalid { field: "cache_capacity".into(), reason: "must be greater than 0".into() }.into();
        assert!(matches!(err, Error::Config(msg) if msg.contains("cache_capacity")));
    }
}
