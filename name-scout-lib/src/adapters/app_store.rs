//! iOS App Store availability adapter.
//!
//! Single GET against the public iTunes Search API. A name counts as taken
//! only on an exact normalized-title match; near matches leave it
//! available. Any network or parse failure yields `Unknown`.

use crate::types::{AppStoreResult, AvailabilityStatus, CheckConfig};
use crate::utils::normalize_title;
use serde::Deserialize;
use tracing::debug;

const SEARCH_URL: &str = "https://itunes.apple.com/search";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "resultCount")]
    result_count: u32,
    results: Vec<AppEntry>,
}

/// One app entry from the search response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AppEntry {
    #[serde(rename = "trackName")]
    pub track_name: String,
    #[serde(rename = "trackViewUrl")]
    pub track_view_url: Option<String>,
}

/// Adapter for the iOS App Store search surface.
pub struct AppStoreClient {
    http: reqwest::Client,
    search_limit: usize,
}

impl AppStoreClient {
    /// Create a client with the shared HTTP client and search cap.
    pub fn new(http: reqwest::Client, config: &CheckConfig) -> Self {
        Self {
            http,
            search_limit: config.search_limit,
        }
    }

    /// Check whether an app with this exact name already exists.
    ///
    /// Never fails: any error at this boundary folds into `Unknown`.
    pub async fn check(&self, name: &str) -> AppStoreResult {
        match self.search(name).await {
            Ok(entries) => classify_entries(name, &entries),
            Err(err) => {
                debug!(name, %err, "app store search failed");
                AppStoreResult::unknown()
            }
        }
    }

    async fn search(&self, name: &str) -> Result<Vec<AppEntry>, reqwest::Error> {
        let response = self
            .http
            .get(SEARCH_URL)
            .query(&[
                ("term", name),
                ("entity", "software"),
                ("limit", &self.search_limit.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: SearchResponse = response.json().await?;
        debug!(name, count = body.result_count, "app store search results");
        Ok(body.results)
    }
}

/// Classify search entries against the query name.
///
/// Exact normalized match only; first match wins. No entries at all, or
/// only near matches, means the name is available on this store.
pub(crate) fn classify_entries(name: &str, entries: &[AppEntry]) -> AppStoreResult {
    let wanted = normalize_title(name);

    for entry in entries {
        if normalize_title(&entry.track_name) == wanted {
            return AppStoreResult {
                status: AvailabilityStatus::Taken,
                existing_app: Some(entry.track_name.clone()),
                store_url: entry.track_view_url.clone(),
            };
        }
    }

    AppStoreResult::available()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str) -> AppEntry {
        AppEntry {
            track_name: title.to_string(),
            track_view_url: Some(format!("https://apps.apple.com/app/{}", title)),
        }
    }

    #[test]
    fn exact_normalized_match_is_taken() {
        let entries = vec![entry("Other App"), entry("Sound Scout")];
        let result = classify_entries("soundscout", &entries);
        assert_eq!(result.status, AvailabilityStatus::Taken);
        assert_eq!(result.existing_app.as_deref(), Some("Sound Scout"));
        assert!(result.store_url.is_some());
    }

    #[test]
    fn first_exact_match_wins() {
        let entries = vec![entry("SoundScout"), entry("Sound Scout")];
        let result = classify_entries("sound scout", &entries);
        assert_eq!(result.existing_app.as_deref(), Some("SoundScout"));
    }

    #[test]
    fn near_match_is_available() {
        // Prefix match is NOT enough on iOS — this policy differs from Play
        let entries = vec![entry("SoundScout Pro"), entry("The Sound Scout App")];
        let result = classify_entries("soundscout", &entries);
        assert_eq!(result.status, AvailabilityStatus::Available);
        assert!(result.existing_app.is_none());
    }

    #[test]
    fn no_entries_is_available() {
        let result = classify_entries("soundscout", &[]);
        assert_eq!(result.status, AvailabilityStatus::Available);
    }
}
