//! JSON snapshot on disk.
//!
//! Accepts either a bare array of products or the backend's listing
//! envelope, so a saved `/api/products` response can be used directly.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use deals_core::types::{Product, ProductListResponse};

use crate::error::CorpusError;
use crate::CorpusProvider;

#[derive(Deserialize)]
#[serde(untagged)]
enum Snapshot {
    Bare(Vec<Product>),
    Listing(ProductListResponse),
}

/// Reads the corpus from a JSON file.
#[derive(Debug, Clone)]
pub struct FileCorpusProvider {
    path: PathBuf,
    max_items: usize,
}

impl FileCorpusProvider {
    pub fn new(path: impl AsRef<Path>, max_items: usize) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            max_items,
        }
    }
}

impl CorpusProvider for FileCorpusProvider {
    fn name(&self) -> &str {
        "file"
    }

    async fn load(&self) -> Result<Vec<Product>, CorpusError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let mut products = match serde_json::from_str::<Snapshot>(&content)? {
            Snapshot::Bare(products) => products,
            Snapshot::Listing(listing) => listing.products,
        };
        products.truncate(self.max_items);
        tracing::debug!(path = %self.path.display(), products = products.len(), "Snapshot read");
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn snapshot(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_bare_array() {
        let file = snapshot(r#"[{"title": "Galaxy A14", "brand": "Samsung"}, {"title": "iPhone 13"}]"#);
        let products = FileCorpusProvider::new(file.path(), 1000).load().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].brand.as_deref(), Some("Samsung"));
    }

    #[tokio::test]
    async fn test_load_listing_envelope() {
        let file = snapshot(r#"{"products": [{"title": "TV"}], "total": 1, "page": 1, "per_page": 20}"#);
        let products = FileCorpusProvider::new(file.path(), 1000).load().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].title, "TV");
    }

    #[tokio::test]
    async fn test_load_applies_cap() {
        let file = snapshot(r#"[{"title": "A"}, {"title": "B"}, {"title": "C"}]"#);
        let products = FileCorpusProvider::new(file.path(), 1).load().await.unwrap();
        assert_eq!(products.len(), 1);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = FileCorpusProvider::new("/nonexistent/snapshot.json", 10)
            .load()
            .await
            .unwrap_err();
        assert!(matches!(err, CorpusError::Io(_)));
    }

    #[tokio::test]
    async fn test_load_invalid_json() {
        let file = snapshot("not json at all");
        let err = FileCorpusProvider::new(file.path(), 10).load().await.unwrap_err();
        assert!(matches!(err, CorpusError::Decode(_)));
    }
}
