//! Domain availability adapter.
//!
//! Uses DNS resolution as a taken/available proxy: a name that resolves is
//! taken, NXDOMAIN suggests it is free, and every other failure class is
//! conservatively reported as taken. False negatives (a free domain shown
//! as taken) are safer than false positives for a purchasing decision.
//!
//! Known limitation: transient resolver outages are indistinguishable from
//! true negatives here and will under-report availability.

use crate::types::{CheckConfig, DomainCheckResult};
use crate::utils::domain_base;
use futures::future::join_all;
use std::time::Duration;
use tracing::debug;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};
use trust_dns_resolver::proto::op::ResponseCode;
use trust_dns_resolver::TokioAsyncResolver;

/// TLDs to probe, in priority order. The general-purpose `.com` comes
/// first, then tech/startup, trendy, business, industry, and short TLDs.
const TLDS: &[&str] = &[
    // Essential
    "com",
    // Tech & startups
    "io", "co", "ai", "app", "dev", "tech", "software",
    // Modern & trendy
    "so", "to", "gg", "xyz", "me", "cc",
    // Business & professional
    "inc", "company", "agency", "studio", "works",
    // Industry specific
    "design", "digital", "cloud", "tools", "systems", "games",
    // Short & memorable
    "sh", "is", "it", "im", "fm", "tv", "vc",
];

/// Name endings that double as registrable TLDs ("domain hacks",
/// e.g. a name ending in "io" yields `prefix.io`).
const HACKABLE_ENDINGS: &[&str] = &[
    "io", "ly", "er", "al", "es", "is", "it", "in", "us", "me", "to", "at", "be", "do", "so",
];

/// Outcome of one DNS lookup, reduced to the classes the availability
/// policy distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LookupOutcome {
    /// Records came back: the domain is in use
    Resolved,
    /// NXDOMAIN: the name does not exist in the registry's zone
    NotFound,
    /// The name exists but returned no records of the queried type
    NoRecords,
    /// Timeout, server failure, or any other resolver error
    Failed,
}

/// Map a lookup outcome to the availability signal.
///
/// Only NXDOMAIN counts as available; NoRecords stays taken because
/// registered domains without A records are common.
pub(crate) fn availability_from_outcome(outcome: LookupOutcome) -> bool {
    matches!(outcome, LookupOutcome::NotFound)
}

/// Classify a resolver error into a [`LookupOutcome`].
fn outcome_from_error(err: &ResolveError) -> LookupOutcome {
    match err.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. } => {
            if *response_code == ResponseCode::NXDomain {
                LookupOutcome::NotFound
            } else {
                LookupOutcome::NoRecords
            }
        }
        _ => LookupOutcome::Failed,
    }
}

/// Adapter that probes a candidate name against the TLD table plus
/// domain-hack variants.
pub struct DomainClient {
    resolver: TokioAsyncResolver,
    dns_timeout: Duration,
    max_tlds: usize,
    max_hacks: usize,
}

impl DomainClient {
    /// Create a domain client from the shared check configuration.
    ///
    /// Prefers the system resolver configuration, falling back to public
    /// defaults when no system configuration is readable.
    pub fn new(config: &CheckConfig) -> Self {
        let resolver = TokioAsyncResolver::tokio_from_system_conf().unwrap_or_else(|_| {
            TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())
        });

        Self {
            resolver,
            dns_timeout: config.dns_timeout,
            max_tlds: config.max_tlds,
            max_hacks: config.max_hacks,
        }
    }

    /// Check a candidate name against the TLD table and hack variants.
    ///
    /// All lookups are issued concurrently; results come back in candidate
    /// order (standard TLDs first, then hacks). Never fails: resolver
    /// errors fold into the conservative taken default per domain.
    pub async fn check_domains(&self, name: &str) -> Vec<DomainCheckResult> {
        let candidates = candidate_domains(name, self.max_tlds, self.max_hacks);

        let checks = candidates.iter().map(|domain| async {
            let outcome = self.lookup(domain).await;
            DomainCheckResult {
                domain: domain.clone(),
                available: availability_from_outcome(outcome),
            }
        });

        join_all(checks).await
    }

    /// Perform one bounded DNS lookup and classify the outcome.
    async fn lookup(&self, domain: &str) -> LookupOutcome {
        match tokio::time::timeout(self.dns_timeout, self.resolver.lookup_ip(domain)).await {
            Ok(Ok(_)) => LookupOutcome::Resolved,
            Ok(Err(err)) => {
                let outcome = outcome_from_error(&err);
                debug!(domain, ?outcome, "dns lookup error");
                outcome
            }
            Err(_) => {
                debug!(domain, "dns lookup timed out");
                LookupOutcome::Failed
            }
        }
    }
}

/// Build the ordered candidate list for a name: up to `max_tlds` standard
/// domains plus up to `max_hacks` domain-hack variants.
pub(crate) fn candidate_domains(name: &str, max_tlds: usize, max_hacks: usize) -> Vec<String> {
    let base = domain_base(name);
    let mut candidates: Vec<String> = TLDS
        .iter()
        .take(max_tlds)
        .map(|tld| format!("{}.{}", base, tld))
        .collect();

    candidates.extend(domain_hacks(name).into_iter().take(max_hacks));
    candidates
}

/// Generate domain-hack variants for names whose lowercase ending matches
/// a hackable TLD (e.g. "studio" → "stud.io").
pub(crate) fn domain_hacks(name: &str) -> Vec<String> {
    let lower = domain_base(name);
    let mut hacks = Vec::new();

    for ending in HACKABLE_ENDINGS {
        if lower.ends_with(ending) && lower.len() > ending.len() {
            let prefix = &lower[..lower.len() - ending.len()];
            hacks.push(format!("{}.{}", prefix, ending));
        }
    }

    hacks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolved_lookup_means_taken() {
        assert!(!availability_from_outcome(LookupOutcome::Resolved));
    }

    #[test]
    fn nxdomain_means_available() {
        assert!(availability_from_outcome(LookupOutcome::NotFound));
    }

    #[test]
    fn other_failures_are_conservatively_taken() {
        assert!(!availability_from_outcome(LookupOutcome::NoRecords));
        assert!(!availability_from_outcome(LookupOutcome::Failed));
    }

    #[test]
    fn candidate_list_starts_with_com() {
        let candidates = candidate_domains("Sound Scout", 12, 2);
        assert_eq!(candidates[0], "soundscout.com");
        assert_eq!(candidates[1], "soundscout.io");
        // 12 standard TLDs, no hack for this ending
        assert_eq!(candidates.len(), 12);
    }

    #[test]
    fn hackable_ending_produces_hack_variant() {
        let hacks = domain_hacks("studio");
        assert!(hacks.contains(&"stud.io".to_string()));

        let candidates = candidate_domains("studio", 12, 2);
        assert!(candidates.contains(&"stud.io".to_string()));
    }

    #[test]
    fn name_equal_to_ending_is_not_hacked() {
        assert!(domain_hacks("io").is_empty());
    }

    #[test]
    fn hack_count_is_capped() {
        // "solo" ends with "so" only; "metro" has none; craft one with two
        let candidates = candidate_domains("panier", 2, 2);
        // ends with "er" -> pani.er; 2 standard + up to 2 hacks
        assert!(candidates.contains(&"pani.er".to_string()));
        assert!(candidates.len() <= 4);
    }
}
