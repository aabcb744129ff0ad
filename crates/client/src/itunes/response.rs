//! iTunes Search API response types.

use serde::Deserialize;

/// Raw response from the iTunes Search API.
///
/// `results` is required: a body without it is a parse failure, not an empty
/// search.
#[derive(Debug, Deserialize)]
pub struct ItunesSearchResponse {
    pub results: Vec<ItunesTrack>,
}

/// Individual search result.
///
/// The resolver reads only `trackViewUrl`; artist and track names are logged.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItunesTrack {
    #[serde(default)]
    pub track_view_url: Option<String>,
    #[serde(default)]
    pub artist_name: Option<String>,
    #[serde(default)]
    pub track_name: Option<String>,
}

impl ItunesSearchResponse {
    /// Store URL of the first result, if present and non-empty.
    ///
    /// Later results are never considered.
    pub fn top_track_url(self) -> Option<String> {
        self.results
            .into_iter()
            .next()
            .and_then(|track| track.track_view_url)
            .filter(|url| !url.is_empty())
    }
}
