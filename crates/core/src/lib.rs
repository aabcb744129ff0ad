//! Core types and shared functionality for songlink-mcp.
//!
//! This crate provides:
//! - The track link data model and the `Resolve` seam
//! - Bounded LRU cache of resolved track links
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod track;

pub use cache::{CacheOptions, CacheStats, TrackLinkCache};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use track::{Resolve, ResolutionResult};
