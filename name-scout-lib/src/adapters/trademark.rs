//! Trademark availability adapter.
//!
//! Drives a headless Chrome session against the public trademark search
//! portal. The session is the only cross-request shared mutable resource
//! in the library: it is created at most once (single-flight behind a
//! lock), reused for the process lifetime, and released only at teardown.
//! Every check runs in its own freshly opened page.
//!
//! Results are cached per normalized name. `UNKNOWN` results are never
//! cached, so transient failures get retried on the next request.

use crate::adapters::trademark_parse::{self, SearchOutcome};
use crate::error::NameCheckError;
use crate::types::{CheckConfig, TrademarkResult, TrademarkStatus};
use crate::utils::normalize_name;
use chromiumoxide::{Browser, BrowserConfig, Element, Page};
use futures::StreamExt;
use rand::Rng;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex as StdMutex;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

const PORTAL_URL: &str = "https://tmsearch.uspto.gov/search/search-information";
const SEARCH_INPUT_SELECTOR: &str = "#searchbar";
const SEARCH_BUTTON_SELECTOR: &str = "button.btn.btn-primary.md-icon";
const DEAD_FILTER_SELECTOR: &str = "#statusDead";

/// Public search-results URL for a name, used for display links.
pub fn search_url(name: &str) -> String {
    let mut encoded = String::with_capacity(name.len());
    for byte in name.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    format!(
        "https://tmsearch.uspto.gov/search/search-results?searchTerm={}",
        encoded
    )
}

/// Process-wide cache from normalized name to trademark result.
///
/// Writes are mutex-guarded so callers may parallelize across names
/// without further coordination.
#[derive(Default)]
pub struct TrademarkCache {
    inner: StdMutex<HashMap<String, TrademarkResult>>,
}

impl TrademarkCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached result, or run `search` and cache its result.
    ///
    /// Only non-`Unknown` results are stored: a transient failure must be
    /// retried on the next request for the same name.
    pub async fn get_or_search<F, Fut>(&self, name: &str, search: F) -> TrademarkResult
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = TrademarkResult>,
    {
        let key = normalize_name(name);

        if let Ok(cache) = self.inner.lock() {
            if let Some(hit) = cache.get(&key) {
                debug!(name = %key, "trademark cache hit");
                return hit.clone();
            }
        }

        let result = search().await;

        if result.status != TrademarkStatus::Unknown {
            if let Ok(mut cache) = self.inner.lock() {
                cache.insert(key, result.clone());
            }
        }

        result
    }
}

struct SessionHandle {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

/// Lazily-launched, shared headless browser session.
///
/// The lock makes creation single-flight: concurrent callers waiting on
/// a cold session all observe the one launch instead of racing.
#[derive(Default)]
pub struct BrowserSession {
    state: Mutex<Option<SessionHandle>>,
}

impl BrowserSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a fresh isolated page, launching the browser first if needed.
    pub async fn open_page(&self) -> Result<Page, NameCheckError> {
        let mut guard = self.state.lock().await;

        if guard.is_none() {
            debug!("launching headless browser session");
            *guard = Some(Self::launch().await?);
        }

        match guard.as_ref() {
            Some(handle) => Ok(handle.browser.new_page("about:blank").await?),
            None => Err(NameCheckError::browser(
                "browser session missing after launch",
            )),
        }
    }

    async fn launch() -> Result<SessionHandle, NameCheckError> {
        let config = BrowserConfig::builder()
            .window_size(1920, 1080)
            .arg("--no-sandbox")
            .arg("--disable-setuid-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu")
            .build()
            .map_err(NameCheckError::browser)?;

        let (browser, mut handler) = Browser::launch(config).await?;

        // The handler stream must be driven for the session to make progress
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(SessionHandle {
            browser,
            handler_task,
        })
    }

    /// Release the browser session. Safe to call when never launched.
    pub async fn close(&self) {
        let mut guard = self.state.lock().await;
        if let Some(mut handle) = guard.take() {
            if let Err(err) = handle.browser.close().await {
                warn!(%err, "browser close failed");
            }
            let _ = handle.browser.wait().await;
            handle.handler_task.abort();
        }
    }
}

/// Adapter for the trademark search portal.
pub struct TrademarkClient {
    session: BrowserSession,
    cache: TrademarkCache,
    navigation_timeout: Duration,
    results_timeout: Duration,
    filter_timeout: Duration,
}

impl TrademarkClient {
    /// Create a client from the shared check configuration.
    pub fn new(config: &CheckConfig) -> Self {
        Self {
            session: BrowserSession::new(),
            cache: TrademarkCache::new(),
            navigation_timeout: config.navigation_timeout,
            results_timeout: config.results_timeout,
            filter_timeout: config.filter_timeout,
        }
    }

    /// Check a name against the trademark registry.
    ///
    /// Never fails past this boundary: any error during the search folds
    /// into an `UNKNOWN` result with a generic detail string.
    pub async fn check_trademark(&self, name: &str) -> TrademarkResult {
        self.cache
            .get_or_search(name, || async {
                match self.search(name).await {
                    Ok(outcome) => trademark_parse::classify(name, &outcome),
                    Err(err) => {
                        warn!(name, %err, "trademark search failed");
                        TrademarkResult::unknown("Could not search the trademark registry")
                    }
                }
            })
            .await
    }

    /// Release held browser resources. Call at session teardown.
    pub async fn close(&self) {
        self.session.close().await;
    }

    /// Run one portal search in a fresh page. The page is closed on every
    /// exit path; the session stays alive.
    async fn search(&self, name: &str) -> Result<SearchOutcome, NameCheckError> {
        // Small randomized delay before navigation reduces detection
        let jitter = rand::thread_rng().gen_range(300..800);
        tokio::time::sleep(Duration::from_millis(jitter)).await;

        let page = self.session.open_page().await?;
        let outcome = self.drive_search(&page, name).await;
        if let Err(err) = page.close().await {
            debug!(%err, "page close failed");
        }
        outcome
    }

    async fn drive_search(&self, page: &Page, name: &str) -> Result<SearchOutcome, NameCheckError> {
        page.goto(PORTAL_URL).await?;

        let input = self
            .find_element_within(page, SEARCH_INPUT_SELECTOR, self.navigation_timeout)
            .await?;
        input.click().await?;
        input.type_str(name).await?;

        let button = self
            .find_element_within(page, SEARCH_BUTTON_SELECTOR, self.navigation_timeout)
            .await?;
        button.click().await?;

        // Wait for either a result count or an explicit error indicator;
        // proceed regardless once the bounded wait elapses.
        let _ = wait_for_body_text(
            page,
            self.results_timeout,
            |text| {
                text.contains("results for")
                    || text.contains("0 results")
                    || text.contains("403")
                    || text.contains("something went wrong")
            },
        )
        .await;

        // Brief pause for the page to stabilize
        tokio::time::sleep(Duration::from_millis(500)).await;

        let mut text = body_text(page).await?;

        if trademark_parse::detect_blocked(&text) {
            return Ok(SearchOutcome::Blocked);
        }

        let initial_count = trademark_parse::parse_total_count(&text);
        if initial_count.is_none() {
            return Ok(SearchOutcome::Unreadable);
        }

        // Narrow to live marks: toggle the dead/cancelled filter off and
        // wait for the count to change. Proceed regardless on timeout.
        if let Ok(filter) = page.find_element(DEAD_FILTER_SELECTOR).await {
            if filter.click().await.is_ok() {
                let _ = wait_for_body_text(page, self.filter_timeout, |t| {
                    trademark_parse::parse_total_count(t) != initial_count
                        || t.contains("0 results")
                })
                .await;
                tokio::time::sleep(Duration::from_millis(300)).await;
                text = body_text(page).await?;
            }
        }

        Ok(trademark_parse::parse_page(&text))
    }

    async fn find_element_within(
        &self,
        page: &Page,
        selector: &str,
        timeout: Duration,
    ) -> Result<Element, NameCheckError> {
        let deadline = Instant::now() + timeout;
        loop {
            match page.find_element(selector).await {
                Ok(element) => return Ok(element),
                Err(_) if Instant::now() < deadline => {
                    tokio::time::sleep(Duration::from_millis(250)).await;
                }
                Err(_) => {
                    return Err(NameCheckError::timeout(
                        format!("waiting for element '{}'", selector),
                        timeout,
                    ));
                }
            }
        }
    }
}

/// Read the rendered body text of a page.
async fn body_text(page: &Page) -> Result<String, NameCheckError> {
    let text: String = page
        .evaluate("document.body.innerText")
        .await?
        .into_value()
        .map_err(|e| NameCheckError::parse(format!("body text: {}", e)))?;
    Ok(text)
}

/// Poll body text until `predicate` holds or the bounded wait elapses.
/// Returns the last observed text either way.
async fn wait_for_body_text<F>(page: &Page, timeout: Duration, predicate: F) -> Option<String>
where
    F: Fn(&str) -> bool,
{
    let deadline = Instant::now() + timeout;
    let mut last = None;

    loop {
        if let Ok(text) = body_text(page).await {
            let done = predicate(&text);
            last = Some(text);
            if done {
                return last;
            }
        }
        if Instant::now() >= deadline {
            return last;
        }
        tokio::time::sleep(Duration::from_millis(250)).await;
    }
}
