//! Availability source adapters.
//!
//! Each adapter queries one external source and normalizes its answer to
//! the shared result shapes in `types`. Adapters are independently-failing:
//! every error inside an adapter folds into an `unknown`/conservative
//! default result at its boundary.

pub mod app_store;
pub mod domains;
pub mod play_store;
pub mod trademark;
pub(crate) mod trademark_parse;

pub use app_store::AppStoreClient;
pub use domains::DomainClient;
pub use play_store::PlayStoreClient;
pub use trademark::TrademarkClient;
