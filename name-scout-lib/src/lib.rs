//! # Name Scout Library
//!
//! A library for generating product name ideas and checking their real-world
//! availability across trademark records, the iOS App Store, Google Play,
//! and domain registrations.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use name_scout_lib::NameChecker;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let checker = NameChecker::new()?;
//!     let result = checker.check_name("lumina").await?;
//!
//!     println!("{}: trademark {:?}", result.name, result.trademark.status);
//!     checker.shutdown().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Parallel Checks**: trademark, both app stores, and DNS run concurrently per name
//! - **Safe Defaults**: a failing source reports `Unknown`/taken, never aborts a batch
//! - **AI Generation**: structured briefs drive idea generation with iterative rounds
//! - **Sessions**: naming sessions persist to disk and can be resumed

// Re-export the main public API types and functions
pub use adapters::trademark::search_url as trademark_search_url;
pub use checker::NameChecker;
pub use config::{ConfigManager, FileConfig};
pub use error::NameCheckError;
pub use generate::{validate_api_key, NameGenerator};
pub use score::{is_fully_available, rank_results, score_result, RankedName};
pub use session::{Session, SessionStore, SessionSummary};
pub use types::{
    AppStoreResult, AvailabilityStatus, CheckConfig, DomainCheckResult, GeneratedName, NameBrief,
    NameCheckResult, NameLength, NameStyle, ProductType, ToneStyle, TrademarkResult,
    TrademarkStatus,
};

// Internal modules
mod adapters;
mod checker;
mod config;
mod error;
mod generate;
mod score;
mod session;
mod types;
mod utils;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, NameCheckError>;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
