//! Client code for songlink-mcp.
//!
//! This crate provides the HTTP clients for the two upstream services and the
//! two-stage resolver that chains them:
//!
//! 1. iTunes Search finds a platform URL for a free-text track descriptor.
//! 2. song.link (Odesli) turns that URL into a cross-platform page.

pub mod error;
mod http;
pub mod itunes;
pub mod resolver;
pub mod songlink;

pub use error::UpstreamError;
pub use itunes::{ItunesClient, ItunesConfig, ItunesSearchResponse, SearchRequest};
pub use resolver::{LinkAggregator, TrackResolver, TrackSearch};
pub use songlink::{SongLinkClient, SongLinkConfig, SongLinkResponse};
