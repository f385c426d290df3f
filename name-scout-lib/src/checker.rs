//! Fan-out orchestrator for per-name availability checking.
//!
//! `NameChecker` owns one client per availability source and, for each
//! candidate name, runs all four concurrently, merging their answers into
//! one `NameCheckResult`. Adapters never fail past their own boundary, so
//! the merge is order-independent and a slow source only delays — never
//! poisons — the record.

use crate::adapters::{AppStoreClient, DomainClient, PlayStoreClient, TrademarkClient};
use crate::error::NameCheckError;
use crate::types::{CheckConfig, NameCheckResult};
use crate::utils::validate_name;
use tracing::{debug, warn};

/// Coordinates availability checks across trademark, both app stores,
/// and domain registries.
///
/// # Example
///
/// ```rust,no_run
/// use name_scout_lib::{NameChecker, CheckConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let checker = NameChecker::new()?;
///     let result = checker.check_name("Lumina").await?;
///     println!("{}: trademark {}", result.name, result.trademark.status);
///     checker.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct NameChecker {
    config: CheckConfig,
    trademark: TrademarkClient,
    ios: AppStoreClient,
    play: PlayStoreClient,
    domains: DomainClient,
}

impl NameChecker {
    /// Create a checker with default configuration.
    pub fn new() -> Result<Self, NameCheckError> {
        Self::with_config(CheckConfig::default())
    }

    /// Create a checker with custom configuration.
    pub fn with_config(config: CheckConfig) -> Result<Self, NameCheckError> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| {
                NameCheckError::network_with_source("Failed to create HTTP client", e.to_string())
            })?;

        Ok(Self {
            trademark: TrademarkClient::new(&config),
            ios: AppStoreClient::new(http.clone(), &config),
            play: PlayStoreClient::new(http, &config),
            domains: DomainClient::new(&config),
            config,
        })
    }

    /// Check one candidate name across all four sources concurrently.
    ///
    /// The four sub-results are always present in the returned record:
    /// a failed source contributes its unknown/conservative default.
    ///
    /// # Errors
    ///
    /// Only invalid input fails here; source failures never do.
    pub async fn check_name(&self, name: &str) -> Result<NameCheckResult, NameCheckError> {
        validate_name(name)?;
        debug!(name, "checking availability");

        let (trademark, ios_app_store, google_play_store, domains) = tokio::join!(
            self.trademark.check_trademark(name),
            self.ios.check(name),
            self.play.check(name),
            self.domains.check_domains(name),
        );

        Ok(NameCheckResult {
            name: name.to_string(),
            trademark,
            ios_app_store,
            google_play_store,
            domains,
        })
    }

    /// Check a batch of names, one at a time.
    ///
    /// The sequential outer loop bounds trademark-portal load. A name
    /// whose check fails contributes an all-unknown record; one bad name
    /// never aborts the batch. Result order matches input order.
    pub async fn check_names(&self, names: &[String]) -> Vec<NameCheckResult> {
        let mut results = Vec::with_capacity(names.len());

        for name in names {
            let result = match self.check_name(name).await {
                Ok(result) => result,
                Err(err) => {
                    warn!(name = name.as_str(), %err, "check failed, recording unknown");
                    NameCheckResult::unknown(name.clone())
                }
            };
            results.push(result);
        }

        results
    }

    /// Release held resources (the shared browser session).
    /// Call once at process/session teardown.
    pub async fn shutdown(&self) {
        self.trademark.close().await;
    }

    /// Get the current configuration for this checker.
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn invalid_name_is_rejected_before_any_network_work() {
        let checker = NameChecker::new().expect("checker");
        assert!(checker.check_name("").await.is_err());
        assert!(checker.check_name("   ").await.is_err());
    }
}
