//! song.link API response types.

use serde::Deserialize;

/// Raw response from the song.link `links` endpoint.
///
/// Only the fields the resolver reads are kept; everything is optional so a
/// 2xx body without `pageUrl` decodes to "no link" rather than an error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongLinkResponse {
    #[serde(default)]
    pub entity_unique_id: Option<String>,
    #[serde(default)]
    pub user_country: Option<String>,
    #[serde(default)]
    pub page_url: Option<String>,
}

impl SongLinkResponse {
    /// Cross-platform page URL, if present and non-empty.
    pub fn into_page_url(self) -> Option<String> {
        self.page_url.filter(|url| !url.is_empty())
    }
}
