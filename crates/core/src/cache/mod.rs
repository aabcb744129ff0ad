//! Bounded in-memory cache of resolved track links.
//!
//! This module memoizes the two-stage track link lookup. It supports:
//!
//! - LRU eviction at a fixed capacity
//! - Caching of definitive "not found" answers alongside found links
//! - Never caching upstream failures
//! - Optional coalescing of concurrent lookups for the same descriptor

pub mod stats;
pub mod track_links;

pub use crate::Error;

pub use stats::CacheStats;
pub use track_links::{CacheOptions, DEFAULT_CAPACITY, TrackLinkCache};
