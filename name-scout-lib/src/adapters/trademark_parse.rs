//! Parsing of rendered trademark portal text into structured records.
//!
//! The portal renders results as unstructured text, so everything here is
//! regex segmentation keyed on the recurring 8-digit serial pattern. This
//! is inherently brittle against markup drift — which is why it lives in
//! its own module, fed by literal page-text fixtures in the tests, so
//! upstream changes only break one component.

use crate::types::{TrademarkResult, TrademarkStatus};
use crate::utils::{normalize_name, truncate_chars};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref COUNT_RE: Regex =
        Regex::new(r"(?i)(\d+(?:,\d+)*)\s+results?\s+for").expect("count pattern is valid");
    static ref SERIAL_RE: Regex =
        Regex::new(r"Check to tag for (\d{8})").expect("serial pattern is valid");
    static ref WORDMARK_RE: Regex =
        Regex::new(r"(?i)Wordmark\s*wordmark\s*([A-Z][A-Z0-9\s'&-]*?)\s*Status")
            .expect("wordmark pattern is valid");
    static ref STATUS_RE: Regex =
        Regex::new(r"(?i)(LIVE|DEAD)(REGISTERED|PENDING|CANCELLED|ABANDONED)")
            .expect("status pattern is valid");
    static ref CLASS_RE: Regex =
        Regex::new(r"(?i)(?:IC|Class)\s*(\d{3})").expect("class pattern is valid");
    static ref GOODS_RE: Regex = Regex::new(
        r"(?i)Goods & services\s*(?:IC \d{3}:\s*)?\[?\s*([^\]]+?)(?:\]|\.|\s*Class|\s*Serial)"
    )
    .expect("goods pattern is valid");
    static ref OWNER_RE: Regex =
        Regex::new(r"(?i)Owners?\s*([A-Za-z][A-Za-z0-9\s,.'&-]+?)(?:\s*\(|Check to tag)")
            .expect("owner pattern is valid");
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").expect("whitespace pattern is valid");
}

/// Maximum structured records extracted from one results page.
const MAX_RECORDS: usize = 10;

/// One trademark record parsed from the results page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TrademarkRecord {
    pub serial_number: String,
    pub word_mark: String,
    pub is_live: bool,
    pub is_registered: bool,
    pub is_pending: bool,
    pub international_class: String,
    pub goods_services: String,
    pub owner: Option<String>,
}

/// Outcome of one portal search, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SearchOutcome {
    /// Bot-block or permission-error page
    Blocked,
    /// No result count could be parsed and no explicit zero marker
    Unreadable,
    /// Parsed results
    Results {
        total: u32,
        records: Vec<TrademarkRecord>,
    },
}

/// Detect a bot-block or error page.
pub(crate) fn detect_blocked(text: &str) -> bool {
    text.contains("403") || text.contains("permission") || text.contains("something went wrong")
}

/// Parse the total result count from page text.
///
/// `Some(0)` for explicit zero-result markers, `None` when no count is
/// readable at all.
pub(crate) fn parse_total_count(text: &str) -> Option<u32> {
    if let Some(cap) = COUNT_RE.captures(text) {
        let digits = cap[1].replace(',', "");
        return digits.parse().ok();
    }

    if text.contains("0 results") || text.to_lowercase().contains("no results") {
        return Some(0);
    }

    None
}

/// Interpret a full page text into a [`SearchOutcome`].
pub(crate) fn parse_page(text: &str) -> SearchOutcome {
    if detect_blocked(text) {
        return SearchOutcome::Blocked;
    }

    match parse_total_count(text) {
        Some(total) => SearchOutcome::Results {
            total,
            records: parse_records(text),
        },
        None => SearchOutcome::Unreadable,
    }
}

/// Segment page text on the serial-number pattern and extract up to
/// [`MAX_RECORDS`] structured records. Records without a readable word
/// mark are dropped.
pub(crate) fn parse_records(text: &str) -> Vec<TrademarkRecord> {
    // (serial, content start, marker start) per "Check to tag" match
    let matches: Vec<(String, usize, usize)> = SERIAL_RE
        .captures_iter(text)
        .filter_map(|cap| {
            let whole = cap.get(0)?;
            let serial = cap.get(1)?.as_str().to_string();
            Some((serial, whole.end(), whole.start()))
        })
        .collect();

    let mut records = Vec::new();

    for (idx, (serial, start, _)) in matches.iter().enumerate() {
        if records.len() >= MAX_RECORDS {
            break;
        }

        let end = matches
            .get(idx + 1)
            .map(|(_, _, next_marker)| *next_marker)
            .unwrap_or(text.len());
        let section = &text[*start..end.max(*start)];

        let word_mark = WORDMARK_RE
            .captures(section)
            .and_then(|cap| cap.get(1).map(|m| m.as_str().trim().to_string()))
            .unwrap_or_default();

        if word_mark.is_empty() {
            continue;
        }

        let status = STATUS_RE
            .captures(section)
            .map(|cap| cap[0].to_uppercase())
            .unwrap_or_default();

        let international_class = CLASS_RE
            .captures(section)
            .and_then(|cap| cap.get(1).map(|m| m.as_str().to_string()))
            .unwrap_or_default();

        let goods_services = GOODS_RE
            .captures(section)
            .and_then(|cap| cap.get(1).map(|m| m.as_str().trim().to_string()))
            .map(|raw| truncate_chars(WHITESPACE_RE.replace_all(&raw, " ").trim(), 100))
            .unwrap_or_default();

        let owner = OWNER_RE
            .captures(section)
            .and_then(|cap| cap.get(1).map(|m| truncate_chars(m.as_str().trim(), 50)));

        records.push(TrademarkRecord {
            serial_number: serial.clone(),
            word_mark,
            is_live: status.contains("LIVE"),
            is_registered: status.contains("REGISTERED"),
            is_pending: status.contains("PENDING"),
            international_class,
            goods_services,
            owner,
        });
    }

    records
}

/// Apply the classification policy ladder to a parsed search outcome.
///
/// Priority order: exact live match, similar live marks, live marks in
/// other classes, unreadable records despite a nonzero count.
pub(crate) fn classify(name: &str, outcome: &SearchOutcome) -> TrademarkResult {
    let normalized = normalize_name(name);

    let (total, records) = match outcome {
        SearchOutcome::Blocked => {
            return TrademarkResult::unknown("Search blocked by the portal (try again later)");
        }
        SearchOutcome::Unreadable => {
            return TrademarkResult::unknown("Could not read search results (try again later)");
        }
        SearchOutcome::Results { total, records } => (*total, records),
    };

    if total == 0 {
        return TrademarkResult::new(
            TrademarkStatus::Available,
            "No live trademarks found in the registry",
        );
    }

    if records.is_empty() {
        return TrademarkResult::new(
            TrademarkStatus::Pending,
            format!("{} live marks found (verify at the registry)", total),
        );
    }

    // Exact live match takes precedence
    if let Some(exact) = records
        .iter()
        .find(|r| r.is_live && normalize_name(&r.word_mark) == normalized)
    {
        let class_info = if exact.international_class.is_empty() {
            String::new()
        } else {
            format!(" Class {}", exact.international_class)
        };
        let goods_info = if exact.goods_services.is_empty() {
            String::new()
        } else {
            format!(": {}", exact.goods_services)
        };

        if exact.is_registered {
            return TrademarkResult::new(
                TrademarkStatus::Registered,
                format!(
                    "Registered (SN: {}){}{}",
                    exact.serial_number, class_info, goods_info
                ),
            );
        }
        if exact.is_pending {
            return TrademarkResult::new(
                TrademarkStatus::Pending,
                format!(
                    "Pending (SN: {}){}{}",
                    exact.serial_number, class_info, goods_info
                ),
            );
        }
        return TrademarkResult::new(
            TrademarkStatus::Pending,
            format!("{} live marks found", total),
        );
    }

    // Similar live marks: containment either way
    let similar: Vec<&TrademarkRecord> = records
        .iter()
        .filter(|r| {
            if !r.is_live {
                return false;
            }
            let mark = normalize_name(&r.word_mark);
            mark.contains(&normalized) || normalized.contains(&mark)
        })
        .collect();

    if !similar.is_empty() {
        let registered: Vec<&&TrademarkRecord> =
            similar.iter().filter(|r| r.is_registered).collect();
        if let Some(first) = registered.first() {
            let class_info = if first.international_class.is_empty() {
                String::new()
            } else {
                format!(" (Class {})", first.international_class)
            };
            let marks: Vec<&str> = registered
                .iter()
                .take(2)
                .map(|r| r.word_mark.as_str())
                .collect();
            return TrademarkResult::new(
                TrademarkStatus::Pending,
                format!(
                    "Similar marks: {}{} - {} total live",
                    marks.join(", "),
                    class_info,
                    total
                ),
            );
        }
        return TrademarkResult::new(
            TrademarkStatus::Pending,
            format!("{} live marks found", total),
        );
    }

    // No similar marks: summarize which classes the live marks occupy,
    // unique in first-seen order
    let mut classes: Vec<&str> = Vec::new();
    for record in records
        .iter()
        .filter(|r| r.is_live && !r.international_class.is_empty())
    {
        let class = record.international_class.as_str();
        if !classes.contains(&class) {
            classes.push(class);
        }
    }

    let classes_str = if classes.is_empty() {
        String::new()
    } else {
        format!(
            " in classes: {}",
            classes
                .iter()
                .take(5)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        )
    };

    TrademarkResult::new(
        TrademarkStatus::Pending,
        format!("{} live marks found{}", total, classes_str),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    // Fixture shaped like captured portal text: results header, then
    // per-record blocks keyed by the "Check to tag" serial markers.
    const RESULTS_PAGE: &str = "\
Filters 2 results for \"soundscout\" live marks\n\
Check to tag for 97123456 Wordmark wordmark SOUNDSCOUT Status \
LIVEREGISTERED Goods & services IC 009: [Audio recognition software]. \
Owners SoundScout Inc (US) \
Check to tag for 88765432 Wordmark wordmark SOUND SCOUT PRO Status \
LIVEPENDING Goods & services IC 042: [Software as a service]. \
Owners Scout Holdings LLC (US)";

    const ZERO_PAGE: &str = "Search 0 results for \"zxqname\"";

    const BLOCKED_PAGE: &str =
        "403 ERROR The request could not be satisfied. permission denied.";

    #[test]
    fn blocked_page_is_detected() {
        assert!(detect_blocked(BLOCKED_PAGE));
        assert!(!detect_blocked(RESULTS_PAGE));
        assert_eq!(parse_page(BLOCKED_PAGE), SearchOutcome::Blocked);
    }

    #[test]
    fn total_count_parses_with_thousands_separators() {
        assert_eq!(parse_total_count("1,234 results for \"acme\""), Some(1234));
        assert_eq!(parse_total_count("1 result for \"acme\""), Some(1));
        assert_eq!(parse_total_count(ZERO_PAGE), Some(0));
        assert_eq!(parse_total_count("an unrelated page"), None);
    }

    #[test]
    fn records_parse_from_fixture() {
        let records = parse_records(RESULTS_PAGE);
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.serial_number, "97123456");
        assert_eq!(first.word_mark, "SOUNDSCOUT");
        assert!(first.is_live);
        assert!(first.is_registered);
        assert!(!first.is_pending);
        assert_eq!(first.international_class, "009");
        assert!(first.goods_services.contains("Audio recognition software"));
        assert!(first.owner.as_deref().unwrap_or("").contains("SoundScout Inc"));

        let second = &records[1];
        assert_eq!(second.word_mark, "SOUND SCOUT PRO");
        assert!(second.is_live);
        assert!(second.is_pending);
    }

    #[test]
    fn exact_live_registered_match_classifies_registered() {
        let outcome = parse_page(RESULTS_PAGE);
        let result = classify("SoundScout", &outcome);
        assert_eq!(result.status, TrademarkStatus::Registered);
        let details = result.details.unwrap();
        assert!(details.contains("97123456"));
        assert!(details.contains("Class 009"));
    }

    #[test]
    fn similar_live_mark_classifies_pending() {
        // Query contained in a live mark but not exactly equal
        let outcome = parse_page(RESULTS_PAGE);
        let result = classify("scout pro", &outcome);
        assert_eq!(result.status, TrademarkStatus::Pending);
    }

    #[test]
    fn zero_results_classifies_available() {
        let outcome = parse_page(ZERO_PAGE);
        let result = classify("zxqname", &outcome);
        assert_eq!(result.status, TrademarkStatus::Available);
    }

    #[test]
    fn nonzero_count_without_records_is_pending_with_raw_count() {
        let outcome = SearchOutcome::Results {
            total: 57,
            records: Vec::new(),
        };
        let result = classify("acme", &outcome);
        assert_eq!(result.status, TrademarkStatus::Pending);
        assert!(result.details.unwrap().contains("57"));
    }

    #[test]
    fn unreadable_page_is_unknown() {
        let result = classify("acme", &SearchOutcome::Unreadable);
        assert_eq!(result.status, TrademarkStatus::Unknown);
    }

    #[test]
    fn unrelated_live_marks_summarize_occupied_classes() {
        let outcome = SearchOutcome::Results {
            total: 3,
            records: vec![TrademarkRecord {
                serial_number: "90000001".to_string(),
                word_mark: "TOTALLY DIFFERENT".to_string(),
                is_live: true,
                is_registered: true,
                is_pending: false,
                international_class: "025".to_string(),
                goods_services: "Clothing".to_string(),
                owner: None,
            }],
        };
        let result = classify("soundscout", &outcome);
        assert_eq!(result.status, TrademarkStatus::Pending);
        assert!(result.details.unwrap().contains("025"));
    }

    #[test]
    fn class_summary_lists_each_class_once() {
        let record = |serial: &str, class: &str| TrademarkRecord {
            serial_number: serial.to_string(),
            word_mark: "TOTALLY DIFFERENT".to_string(),
            is_live: true,
            is_registered: true,
            is_pending: false,
            international_class: class.to_string(),
            goods_services: String::new(),
            owner: None,
        };
        // Repeat class is not adjacent to its first occurrence
        let outcome = SearchOutcome::Results {
            total: 3,
            records: vec![
                record("90000001", "009"),
                record("90000002", "025"),
                record("90000003", "009"),
            ],
        };

        let result = classify("soundscout", &outcome);
        let details = result.details.unwrap();
        assert!(details.contains("009, 025"));
        assert_eq!(details.matches("009").count(), 1);
    }

    #[test]
    fn goods_text_is_truncated_with_marker() {
        let long_goods = "x".repeat(150);
        let page = format!(
            "1 result for \"acme\" Check to tag for 90000002 Wordmark wordmark ACME \
             Status LIVEREGISTERED Goods & services IC 009: [{}]. Owners Acme Co (US)",
            long_goods
        );
        let records = parse_records(&page);
        assert_eq!(records.len(), 1);
        assert!(records[0].goods_services.ends_with("..."));
        // 100 chars plus the three-character marker
        assert_eq!(records[0].goods_services.chars().count(), 103);
    }
}
