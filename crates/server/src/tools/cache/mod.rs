//! Cache-related MCP tools.
//!
//! This module provides read-only tools for inspecting the track link cache.

pub mod stats;

pub use stats::stats_impl;
