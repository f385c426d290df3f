//! Desirability scoring over accumulated name-check results.
//!
//! Pure functions: no I/O, stable and idempotent. Weights favor the
//! trademark signal (hardest to recover from) over the app stores, with
//! each free domain adding one point.

use crate::types::{AvailabilityStatus, NameCheckResult, TrademarkStatus};

/// The general-purpose TLD a "fully available" name must have free.
pub const PRIMARY_TLD: &str = "com";

/// A scored, ranked entry derived from one result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedName {
    pub name: String,
    pub score: u32,
    pub fully_available: bool,
}

/// Compute the desirability score for one result.
///
/// 3 points for trademark AVAILABLE, 2 per available store, 1 per
/// available domain.
pub fn score_result(result: &NameCheckResult) -> u32 {
    let mut score = 0;

    if result.trademark.status == TrademarkStatus::Available {
        score += 3;
    }
    if result.ios_app_store.status == AvailabilityStatus::Available {
        score += 2;
    }
    if result.google_play_store.status == AvailabilityStatus::Available {
        score += 2;
    }

    score + result.domains.iter().filter(|d| d.available).count() as u32
}

/// Whether a name is clear everywhere that matters: trademark available,
/// both stores available, and at least one free domain ending in the
/// primary TLD.
pub fn is_fully_available(result: &NameCheckResult) -> bool {
    result.trademark.status == TrademarkStatus::Available
        && result.ios_app_store.status == AvailabilityStatus::Available
        && result.google_play_store.status == AvailabilityStatus::Available
        && result
            .domains
            .iter()
            .any(|d| d.available && d.domain.ends_with(&format!(".{}", PRIMARY_TLD)))
}

/// Rank results score-descending. The sort is stable: ties keep their
/// original (generation) order.
pub fn rank_results(results: &[NameCheckResult]) -> Vec<RankedName> {
    let mut ranked: Vec<RankedName> = results
        .iter()
        .map(|r| RankedName {
            name: r.name.clone(),
            score: score_result(r),
            fully_available: is_fully_available(r),
        })
        .collect();

    ranked.sort_by_key(|entry| std::cmp::Reverse(entry.score));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AppStoreResult, DomainCheckResult, TrademarkResult};

    fn result(
        name: &str,
        trademark: TrademarkStatus,
        ios: AvailabilityStatus,
        play: AvailabilityStatus,
        domains: &[(&str, bool)],
    ) -> NameCheckResult {
        NameCheckResult {
            name: name.to_string(),
            trademark: TrademarkResult {
                status: trademark,
                details: None,
            },
            ios_app_store: AppStoreResult {
                status: ios,
                existing_app: None,
                store_url: None,
            },
            google_play_store: AppStoreResult {
                status: play,
                existing_app: None,
                store_url: None,
            },
            domains: domains
                .iter()
                .map(|(d, a)| DomainCheckResult {
                    domain: d.to_string(),
                    available: *a,
                })
                .collect(),
        }
    }

    #[test]
    fn score_adds_up_across_sources() {
        let r = result(
            "a",
            TrademarkStatus::Available,
            AvailabilityStatus::Available,
            AvailabilityStatus::Available,
            &[("a.com", true), ("a.io", false)],
        );
        assert_eq!(score_result(&r), 8); // 3 + 2 + 2 + 1
        assert!(is_fully_available(&r));
    }

    #[test]
    fn taken_com_blocks_fully_available_even_with_positive_score() {
        let r = result(
            "a",
            TrademarkStatus::Available,
            AvailabilityStatus::Available,
            AvailabilityStatus::Available,
            &[("a.com", false), ("a.io", true)],
        );
        assert_eq!(score_result(&r), 8);
        assert!(!is_fully_available(&r));
    }

    #[test]
    fn unknown_statuses_earn_nothing() {
        let r = NameCheckResult::unknown("mystery");
        assert_eq!(score_result(&r), 0);
        assert!(!is_fully_available(&r));
    }

    #[test]
    fn ranking_is_score_descending_and_stable_on_ties() {
        let results = vec![
            result(
                "first-tie",
                TrademarkStatus::Unknown,
                AvailabilityStatus::Available,
                AvailabilityStatus::Unknown,
                &[],
            ),
            result(
                "winner",
                TrademarkStatus::Available,
                AvailabilityStatus::Available,
                AvailabilityStatus::Available,
                &[("winner.com", true)],
            ),
            result(
                "second-tie",
                TrademarkStatus::Unknown,
                AvailabilityStatus::Unknown,
                AvailabilityStatus::Available,
                &[],
            ),
        ];

        let ranked = rank_results(&results);
        assert_eq!(ranked[0].name, "winner");
        // Equal scores keep generation order
        assert_eq!(ranked[1].name, "first-tie");
        assert_eq!(ranked[2].name, "second-tie");
    }

    #[test]
    fn ranking_is_idempotent() {
        let results = vec![
            result(
                "a",
                TrademarkStatus::Available,
                AvailabilityStatus::Available,
                AvailabilityStatus::Taken,
                &[("a.com", true)],
            ),
            result(
                "b",
                TrademarkStatus::Pending,
                AvailabilityStatus::Available,
                AvailabilityStatus::Available,
                &[("b.com", false)],
            ),
        ];

        let once = rank_results(&results);
        let twice = rank_results(&results);
        assert_eq!(once, twice);

        let fully_once: Vec<&str> = once
            .iter()
            .filter(|r| r.fully_available)
            .map(|r| r.name.as_str())
            .collect();
        let fully_twice: Vec<&str> = twice
            .iter()
            .filter(|r| r.fully_available)
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(fully_once, fully_twice);
    }
}
