// name-scout-lib/tests/integration.rs

//! Integration tests for name-scout-lib exports and core functionality

use name_scout_lib::{
    is_fully_available, rank_results, score_result, AppStoreResult, AvailabilityStatus,
    CheckConfig, DomainCheckResult, GeneratedName, NameBrief, NameCheckResult, NameChecker,
    Session, SessionStore, ToneStyle, TrademarkResult, TrademarkStatus,
};
use tempfile::TempDir;

fn available_everywhere(name: &str) -> NameCheckResult {
    NameCheckResult {
        name: name.to_string(),
        trademark: TrademarkResult {
            status: TrademarkStatus::Available,
            details: None,
        },
        ios_app_store: AppStoreResult::available(),
        google_play_store: AppStoreResult::available(),
        domains: vec![
            DomainCheckResult {
                domain: format!("{}.com", name),
                available: true,
            },
            DomainCheckResult {
                domain: format!("{}.io", name),
                available: true,
            },
        ],
    }
}

#[test]
fn library_exports_work() {
    let config = CheckConfig::default();
    assert_eq!(config.max_tlds, 12);
    assert_eq!(config.max_hacks, 2);

    let brief = NameBrief::from_args("a scheduling tool", vec!["time".to_string()], "friendly");
    assert_eq!(brief.tone_style, ToneStyle::Friendly);
    assert_eq!(brief.keywords, vec!["time"]);
}

#[test]
fn substitute_record_is_safe_everywhere() {
    // A failed per-name check yields a record that scores zero and never
    // reads as fully available.
    let result = NameCheckResult::unknown("ghost");
    assert_eq!(result.trademark.status, TrademarkStatus::Unknown);
    assert_eq!(result.ios_app_store.status, AvailabilityStatus::Unknown);
    assert_eq!(result.google_play_store.status, AvailabilityStatus::Unknown);
    assert!(result.domains.is_empty());
    assert_eq!(score_result(&result), 0);
    assert!(!is_fully_available(&result));
}

#[test]
fn ranking_orders_by_score_descending() {
    let strong = available_everywhere("lumina");
    let weak = NameCheckResult::unknown("ghost");
    let mut middling = NameCheckResult::unknown("echo");
    middling.ios_app_store = AppStoreResult::available();

    let ranked = rank_results(&[weak.clone(), middling.clone(), strong.clone()]);
    assert_eq!(ranked[0].name, "lumina");
    assert_eq!(ranked[1].name, "echo");
    assert_eq!(ranked[2].name, "ghost");
    assert!(ranked[0].fully_available);
    assert!(!ranked[1].fully_available);
}

#[test]
fn full_availability_requires_a_dot_com() {
    let mut result = available_everywhere("lumina");
    assert!(is_fully_available(&result));

    result.domains.retain(|d| !d.domain.ends_with(".com"));
    assert!(score_result(&result) > 0);
    assert!(!is_fully_available(&result));
}

#[test]
fn session_persists_and_resumes() {
    let tmp = TempDir::new().unwrap();
    let store = SessionStore::with_dir(tmp.path());

    let brief = NameBrief::from_args("a fitness tracker", vec![], "bold");
    let mut session = Session::new(brief);
    session.add_names(&[GeneratedName {
        name: "Pulse".to_string(),
        reasoning: Some("suggests heartbeat and rhythm".to_string()),
    }]);
    session.add_results(&[available_everywhere("Pulse")]);
    store.save(&mut session).unwrap();

    let listed = store.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, session.id);
    assert_eq!(listed[0].name_count, 1);

    let resumed = store.load(&listed[0].id).unwrap();
    assert_eq!(resumed.brief.description, "a fitness tracker");
    assert_eq!(resumed.all_names(), vec!["Pulse"]);
    assert_eq!(resumed.results.len(), 1);

    store.delete(&session.id).unwrap();
    assert!(store.list().unwrap().is_empty());
}

#[tokio::test]
async fn checker_rejects_invalid_names() {
    let checker = NameChecker::new().unwrap();
    assert!(checker.check_name("").await.is_err());
    assert!(checker.check_name("   ").await.is_err());
    checker.shutdown().await;
}

#[tokio::test]
async fn batch_substitutes_for_invalid_names() {
    let checker = NameChecker::new().unwrap();
    let results = checker.check_names(&["".to_string()]).await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].trademark.status, TrademarkStatus::Unknown);
    checker.shutdown().await;
}
