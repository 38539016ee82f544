//! Product corpus providers.
//!
//! The corpus is loaded once per session and shared read-only. Providers
//! fetch it from the deals backend, a JSON snapshot on disk, or memory.
//! [`load_or_empty`] turns any load failure into an empty corpus so the
//! assistant keeps answering ("no matches") instead of crashing.

use std::future::Future;
use std::sync::Arc;

use deals_core::config::CorpusConfig;
use deals_core::types::Product;

pub mod error;
pub mod file;
pub mod http;

pub use error::CorpusError;
pub use file::FileCorpusProvider;
pub use http::HttpCorpusProvider;

// =============================================================================
// Traits
// =============================================================================

/// Source of the product corpus.
pub trait CorpusProvider: Send + Sync {
    /// Short label used in log lines.
    fn name(&self) -> &str;

    /// Fetch every product the source offers, up to its configured cap.
    fn load(&self) -> impl Future<Output = Result<Vec<Product>, CorpusError>> + Send;
}

// =============================================================================
// Static provider
// =============================================================================

/// In-memory provider, mostly useful for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct StaticCorpusProvider {
    products: Vec<Product>,
}

impl StaticCorpusProvider {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

impl CorpusProvider for StaticCorpusProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn load(&self) -> Result<Vec<Product>, CorpusError> {
        Ok(self.products.clone())
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Load the corpus, degrading to an empty one on failure.
pub async fn load_or_empty<P: CorpusProvider>(provider: &P) -> Arc<[Product]> {
    match provider.load().await {
        Ok(products) => {
            tracing::info!(source = provider.name(), products = products.len(), "Corpus loaded");
            products.into()
        }
        Err(e) => {
            tracing::warn!(
                source = provider.name(),
                error = %e,
                "Corpus unavailable, continuing with an empty catalogue"
            );
            Arc::from(Vec::new())
        }
    }
}

/// Provider selected from configuration: the file snapshot when one is
/// configured, otherwise the backend API.
#[derive(Debug, Clone)]
pub enum ConfiguredProvider {
    File(FileCorpusProvider),
    Http(HttpCorpusProvider),
}

impl ConfiguredProvider {
    pub fn from_config(config: &CorpusConfig) -> Result<Self, CorpusError> {
        match &config.file {
            Some(path) => Ok(Self::File(FileCorpusProvider::new(path, config.max_items))),
            None => Ok(Self::Http(HttpCorpusProvider::from_config(config)?)),
        }
    }
}

impl CorpusProvider for ConfiguredProvider {
    fn name(&self) -> &str {
        match self {
            Self::File(p) => p.name(),
            Self::Http(p) => p.name(),
        }
    }

    async fn load(&self) -> Result<Vec<Product>, CorpusError> {
        match self {
            Self::File(p) => p.load().await,
            Self::Http(p) => p.load().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingProvider;

    impl CorpusProvider for FailingProvider {
        fn name(&self) -> &str {
            "failing"
        }

        async fn load(&self) -> Result<Vec<Product>, CorpusError> {
            Err(CorpusError::Status(503))
        }
    }

    #[tokio::test]
    async fn test_static_provider_returns_products() {
        let provider = StaticCorpusProvider::new(vec![Product::new("A"), Product::new("B")]);
        let corpus = load_or_empty(&provider).await;
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus[0].title, "A");
    }

    #[tokio::test]
    async fn test_load_failure_degrades_to_empty() {
        let corpus = load_or_empty(&FailingProvider).await;
        assert!(corpus.is_empty());
    }

    #[test]
    fn test_configured_provider_prefers_file() {
        let config = CorpusConfig {
            file: Some("/tmp/snapshot.json".to_string()),
            ..CorpusConfig::default()
        };
        let provider = ConfiguredProvider::from_config(&config).unwrap();
        assert!(matches!(provider, ConfiguredProvider::File(_)));
        assert_eq!(provider.name(), "file");
    }

    #[test]
    fn test_configured_provider_falls_back_to_http() {
        let provider = ConfiguredProvider::from_config(&CorpusConfig::default()).unwrap();
        assert!(matches!(provider, ConfiguredProvider::Http(_)));
        assert_eq!(provider.name(), "http");
    }

    #[tokio::test]
    async fn test_configured_missing_file_degrades_to_empty() {
        let config = CorpusConfig {
            file: Some("/nonexistent/deals/snapshot.json".to_string()),
            ..CorpusConfig::default()
        };
        let provider = ConfiguredProvider::from_config(&config).unwrap();
        assert!(load_or_empty(&provider).await.is_empty());
    }
}
