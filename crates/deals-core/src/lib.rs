pub mod catalog;
pub mod config;
pub mod error;
pub mod types;

pub use catalog::{deal_score, top_deals, CatalogStats, TopDeal};
pub use config::DealsConfig;
pub use error::{DealsError, Result};
pub use types::*;
