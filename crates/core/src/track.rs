//! Track link data model.
//!
//! A track is identified by its descriptor, an opaque and case-sensitive
//! string conventionally formatted as `"<artist> - <title>"`. Descriptors are
//! used verbatim as cache keys; no normalization is applied.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Error;

/// Outcome of resolving a track descriptor to a cross-platform link.
///
/// `NotFound` is a definitive answer from upstream, not an error and not a
/// cache miss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", content = "link", rename_all = "snake_case")]
pub enum ResolutionResult {
    /// Canonical cross-platform page URL (never empty).
    Found(String),
    /// No usable link exists for this descriptor.
    NotFound,
}

impl ResolutionResult {
    /// Build a result from an optional upstream field.
    ///
    /// Missing and empty values are both treated as not found.
    pub fn from_link(link: Option<String>) -> Self {
        match link {
            Some(link) if !link.is_empty() => ResolutionResult::Found(link),
            _ => ResolutionResult::NotFound,
        }
    }

    /// The resolved link, if any.
    pub fn link(&self) -> Option<&str> {
        match self {
            ResolutionResult::Found(link) => Some(link),
            ResolutionResult::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, ResolutionResult::Found(_))
    }
}

/// Resolves a track descriptor against upstream services.
///
/// Implementations return `Ok(ResolutionResult::NotFound)` when upstream
/// answered but had no match, and `Err` only for transport, status or
/// parse failures.
#[async_trait]
pub trait Resolve: Send + Sync {
    async fn resolve(&self, descriptor: &str) -> Result<ResolutionResult, Error>;
}
