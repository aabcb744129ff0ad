//! iTunes Search API request types.

use serde::Serialize;

/// Search request parameters for the iTunes Search API.
///
/// Fields serialize in declaration order as `term`, `country`, `entity`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SearchRequest {
    /// Free-text search term (the track descriptor, sent verbatim).
    pub term: String,

    /// Storefront country code (ISO 3166-1 alpha-2, e.g., "RU").
    pub country: String,

    /// Kind of media object to return.
    pub entity: Entity,
}

/// iTunes Search entity filter. Only songs are searched.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Entity {
    Song,
}

impl SearchRequest {
    /// A song search for `term` in the `country` storefront.
    pub fn song(term: impl Into<String>, country: impl Into<String>) -> Self {
        Self { term: term.into(), country: country.into(), entity: Entity::Song }
    }
}
