//! Core data types for name availability checking.
//!
//! This module defines the result shapes produced by the availability
//! adapters, the unified per-name record assembled by the orchestrator,
//! the generation brief, and the checker configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Three-valued availability outcome used by the app store adapters.
///
/// `Unknown` is a first-class outcome, not an error: it means the source
/// could not produce a confident answer (timeout, parse failure, block).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    Available,
    Taken,
    Unknown,
}

/// Trademark registration outcome.
///
/// Distinct from [`AvailabilityStatus`] because trademark search has a
/// meaningful middle state: live marks exist but an exact registration
/// for the candidate is ambiguous or still pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrademarkStatus {
    Available,
    Pending,
    Registered,
    Unknown,
}

/// Result of probing a single fully-qualified domain.
///
/// There is no unknown state here: resolution failures other than NXDOMAIN
/// are conservatively reported as taken (see the domains adapter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainCheckResult {
    /// Fully qualified, lowercase domain name (e.g. "example.com")
    pub domain: String,

    /// Whether the domain appears available for registration
    pub available: bool,
}

/// Result from one app store adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppStoreResult {
    pub status: AvailabilityStatus,

    /// Title of the matching app, populated only when `status == Taken`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing_app: Option<String>,

    /// Link to the matching app or a store search page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_url: Option<String>,
}

impl AppStoreResult {
    /// An unknown result without any match details.
    pub fn unknown() -> Self {
        Self {
            status: AvailabilityStatus::Unknown,
            existing_app: None,
            store_url: None,
        }
    }

    /// An available result without any match details.
    pub fn available() -> Self {
        Self {
            status: AvailabilityStatus::Available,
            existing_app: None,
            store_url: None,
        }
    }
}

/// Result from the trademark adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrademarkResult {
    pub status: TrademarkStatus,

    /// Human-readable context: serial number, class, similar marks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl TrademarkResult {
    pub fn new(status: TrademarkStatus, details: impl Into<String>) -> Self {
        Self {
            status,
            details: Some(details.into()),
        }
    }

    /// An unknown result with an explanatory detail string.
    pub fn unknown(details: impl Into<String>) -> Self {
        Self::new(TrademarkStatus::Unknown, details)
    }
}

/// The unified availability record for one candidate name.
///
/// All four sub-results are always present: a failed adapter contributes
/// an unknown/safe-default value rather than omitting its field, which
/// keeps downstream scoring and display consistent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameCheckResult {
    pub name: String,
    pub trademark: TrademarkResult,
    pub ios_app_store: AppStoreResult,
    pub google_play_store: AppStoreResult,
    pub domains: Vec<DomainCheckResult>,
}

impl NameCheckResult {
    /// Substitute record used when a whole per-name check fails
    /// unexpectedly. One bad name must never abort a batch.
    pub fn unknown(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            trademark: TrademarkResult {
                status: TrademarkStatus::Unknown,
                details: None,
            },
            ios_app_store: AppStoreResult::unknown(),
            google_play_store: AppStoreResult::unknown(),
            domains: Vec::new(),
        }
    }
}

/// A name proposed by the generation step, with optional rationale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedName {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

/// What kind of product is being named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    App,
    Saas,
    Website,
    Physical,
    Service,
    Other,
}

/// Tone the generated names should convey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToneStyle {
    Modern,
    Friendly,
    Professional,
    Playful,
    Luxurious,
    Bold,
}

impl ToneStyle {
    /// Parse a user-supplied style keyword, falling back to `Modern`.
    pub fn from_keyword(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "friendly" => Self::Friendly,
            "professional" => Self::Professional,
            "playful" => Self::Playful,
            "luxurious" => Self::Luxurious,
            "bold" => Self::Bold,
            _ => Self::Modern,
        }
    }
}

/// Construction style for generated names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameStyle {
    RealWords,
    Invented,
    Compound,
    Abstract,
    Any,
}

/// Preferred character length for generated names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameLength {
    Short,
    Medium,
    Long,
    Any,
}

/// The structured brief that drives name generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameBrief {
    pub product_type: ProductType,
    pub description: String,
    pub industry: String,
    pub target_audience: String,

    pub tone_style: ToneStyle,
    pub name_style: NameStyle,
    pub name_length: NameLength,

    pub keywords: Vec<String>,
    pub themes: Vec<String>,
    pub avoid_words: Vec<String>,
    pub competitors: Vec<String>,
}

impl NameBrief {
    /// Build a minimal brief from one-shot CLI arguments.
    pub fn from_args(description: impl Into<String>, keywords: Vec<String>, style: &str) -> Self {
        Self {
            product_type: ProductType::Other,
            description: description.into(),
            industry: "technology".to_string(),
            target_audience: "general consumers".to_string(),
            tone_style: ToneStyle::from_keyword(style),
            name_style: NameStyle::Any,
            name_length: NameLength::Any,
            keywords,
            themes: Vec::new(),
            avoid_words: Vec::new(),
            competitors: Vec::new(),
        }
    }
}

/// Configuration options for the name checker.
///
/// Each adapter enforces its own bounded wait; a timed-out adapter resolves
/// to its safe default rather than blocking the batch.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Timeout for each DNS lookup
    pub dns_timeout: Duration,

    /// Timeout for each store/search HTTP request
    pub http_timeout: Duration,

    /// Timeout for trademark portal page navigation and element waits
    pub navigation_timeout: Duration,

    /// Bounded wait for the portal result-count indicator
    pub results_timeout: Duration,

    /// Bounded wait for the result count to change after toggling the
    /// dead-marks filter
    pub filter_timeout: Duration,

    /// How many entries of the TLD priority table to probe
    pub max_tlds: usize,

    /// How many domain-hack variants to probe
    pub max_hacks: usize,

    /// Maximum store search entries to consider per query
    pub search_limit: usize,

    /// User agent sent on scraping requests
    pub user_agent: String,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            dns_timeout: Duration::from_secs(5),
            http_timeout: Duration::from_secs(10),
            navigation_timeout: Duration::from_secs(20),
            results_timeout: Duration::from_secs(15),
            filter_timeout: Duration::from_secs(8),
            max_tlds: 12,
            max_hacks: 2,
            search_limit: 10,
            user_agent: concat!(
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) ",
                "AppleWebKit/537.36 (KHTML, like Gecko) ",
                "Chrome/120.0.0.0 Safari/537.36"
            )
            .to_string(),
        }
    }
}

impl CheckConfig {
    /// Set the DNS lookup timeout.
    pub fn with_dns_timeout(mut self, timeout: Duration) -> Self {
        self.dns_timeout = timeout;
        self
    }

    /// Set the HTTP request timeout for the store adapters.
    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    /// Set how many TLD table entries are probed per name.
    pub fn with_max_tlds(mut self, max_tlds: usize) -> Self {
        self.max_tlds = max_tlds;
        self
    }

    /// Set the store search result cap.
    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit.clamp(1, 50);
        self
    }
}

impl std::fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AvailabilityStatus::Available => write!(f, "available"),
            AvailabilityStatus::Taken => write!(f, "taken"),
            AvailabilityStatus::Unknown => write!(f, "unknown"),
        }
    }
}

impl std::fmt::Display for TrademarkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrademarkStatus::Available => write!(f, "AVAILABLE"),
            TrademarkStatus::Pending => write!(f, "PENDING"),
            TrademarkStatus::Registered => write!(f, "REGISTERED"),
            TrademarkStatus::Unknown => write!(f, "UNKNOWN"),
        }
    }
}
