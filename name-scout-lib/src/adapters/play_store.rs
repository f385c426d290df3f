//! Google Play availability adapter.
//!
//! No public structured search API is available here, so this adapter
//! scrapes the public search page with a browser-like user agent and
//! extracts title candidates from aria-label attributes.
//!
//! Matching is deliberately looser than the iOS adapter: an exact
//! normalized match OR a stored title that starts with the query counts
//! as taken, and a raw-page substring probe acts as a secondary taken
//! signal. Scraped markup is noisy; the looseness is preserved behavior,
//! not something to silently align with the iOS policy.

use crate::types::{AppStoreResult, AvailabilityStatus, CheckConfig};
use crate::utils::normalize_title;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

const SEARCH_URL: &str = "https://play.google.com/store/search";

lazy_static! {
    /// Title candidates surface as aria-label attributes in the rendered
    /// search markup.
    static ref ARIA_LABEL_RE: Regex =
        Regex::new(r#"aria-label="([^"]{1,120})""#).expect("aria-label pattern is valid");
}

/// Adapter for the Google Play search surface.
pub struct PlayStoreClient {
    http: reqwest::Client,
    search_limit: usize,
    user_agent: String,
}

impl PlayStoreClient {
    /// Create a client with the shared HTTP client.
    pub fn new(http: reqwest::Client, config: &CheckConfig) -> Self {
        Self {
            http,
            search_limit: config.search_limit,
            user_agent: config.user_agent.clone(),
        }
    }

    /// Check whether an app with this name already exists on Google Play.
    ///
    /// Never fails: any error at this boundary folds into `Unknown`.
    pub async fn check(&self, name: &str) -> AppStoreResult {
        match self.fetch_search_page(name).await {
            Ok(html) => {
                let titles = extract_titles(&html, self.search_limit);
                classify_titles(name, &titles, &html)
            }
            Err(err) => {
                debug!(name, %err, "play store search failed");
                AppStoreResult::unknown()
            }
        }
    }

    /// GET the public search page. Redirects are followed (one consent
    /// redirect is common); non-success statuses are errors.
    async fn fetch_search_page(&self, name: &str) -> Result<String, reqwest::Error> {
        let response = self
            .http
            .get(SEARCH_URL)
            .query(&[("q", name), ("c", "apps")])
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await?
            .error_for_status()?;

        response.text().await
    }
}

/// Public search URL for a name, used as the store link when taken.
pub fn search_url(name: &str) -> String {
    format!("{}?q={}&c=apps", SEARCH_URL, urlencode(name))
}

/// Minimal percent-encoding for query values.
fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// Pull title candidates out of the scraped page.
pub(crate) fn extract_titles(html: &str, limit: usize) -> Vec<String> {
    ARIA_LABEL_RE
        .captures_iter(html)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().trim().to_string()))
        .filter(|title| !title.is_empty())
        .take(limit)
        .collect()
}

/// Classify extracted titles against the query name.
///
/// Taken on exact normalized match or when a title starts with the
/// normalized query (the Play-specific looseness). Falls back to a
/// substring probe of the raw page text as a secondary taken signal.
pub(crate) fn classify_titles(name: &str, titles: &[String], page_text: &str) -> AppStoreResult {
    let wanted = normalize_title(name);
    if wanted.is_empty() {
        return AppStoreResult::unknown();
    }

    for title in titles {
        let normalized = normalize_title(title);
        if normalized == wanted || normalized.starts_with(&wanted) {
            return AppStoreResult {
                status: AvailabilityStatus::Taken,
                existing_app: Some(title.clone()),
                store_url: Some(search_url(name)),
            };
        }
    }

    // Secondary signal: the normalized name appearing verbatim in the page
    // body usually means a listing the attribute pass missed.
    if normalize_title(page_text).contains(&wanted) {
        return AppStoreResult {
            status: AvailabilityStatus::Taken,
            existing_app: None,
            store_url: Some(search_url(name)),
        };
    }

    AppStoreResult::available()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn exact_match_is_taken() {
        let result = classify_titles("soundscout", &titles(&["Sound Scout"]), "");
        assert_eq!(result.status, AvailabilityStatus::Taken);
        assert_eq!(result.existing_app.as_deref(), Some("Sound Scout"));
    }

    #[test]
    fn prefix_match_is_taken_unlike_ios() {
        // "SoundScout Pro" starts with the normalized query: taken here,
        // while the iOS adapter reports available for the same input.
        let result = classify_titles("soundscout", &titles(&["SoundScout Pro"]), "");
        assert_eq!(result.status, AvailabilityStatus::Taken);
        assert_eq!(result.existing_app.as_deref(), Some("SoundScout Pro"));

        let ios = crate::adapters::app_store::classify_entries(
            "soundscout",
            &[crate::adapters::app_store::AppEntry {
                track_name: "SoundScout Pro".to_string(),
                track_view_url: None,
            }],
        );
        assert_eq!(ios.status, AvailabilityStatus::Available);
    }

    #[test]
    fn unrelated_titles_are_available() {
        let result = classify_titles("soundscout", &titles(&["Podcast Player", "Tuner"]), "");
        assert_eq!(result.status, AvailabilityStatus::Available);
    }

    #[test]
    fn raw_page_substring_is_secondary_taken_signal() {
        let page = "<div>Install Sound Scout today</div>";
        let result = classify_titles("soundscout", &[], page);
        assert_eq!(result.status, AvailabilityStatus::Taken);
        assert!(result.existing_app.is_none());
        assert!(result.store_url.is_some());
    }

    #[test]
    fn titles_extracted_from_aria_labels() {
        let html = r#"<a aria-label="Sound Scout"></a><a aria-label="Tuner Pro"></a>"#;
        let extracted = extract_titles(html, 10);
        assert_eq!(extracted, vec!["Sound Scout", "Tuner Pro"]);
    }

    #[test]
    fn extraction_respects_limit() {
        let html = r#"<a aria-label="A"></a><a aria-label="B"></a><a aria-label="C"></a>"#;
        assert_eq!(extract_titles(html, 2).len(), 2);
    }
}
