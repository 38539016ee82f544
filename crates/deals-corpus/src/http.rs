//! Bulk product listing over the deals backend's REST API.

use std::time::Duration;

use deals_core::config::CorpusConfig;
use deals_core::types::{Product, ProductListResponse};

use crate::error::CorpusError;
use crate::CorpusProvider;

const LISTING_PATH: &str = "/api/products";

/// Fetches the corpus with a single `GET /api/products?per_page=N` call.
#[derive(Debug, Clone)]
pub struct HttpCorpusProvider {
    http: reqwest::Client,
    base_url: String,
    max_items: usize,
}

impl HttpCorpusProvider {
    pub fn new(
        base_url: &str,
        max_items: usize,
        request_timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, CorpusError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_items,
        })
    }

    pub fn from_config(config: &CorpusConfig) -> Result<Self, CorpusError> {
        Self::new(
            &config.api_url,
            config.max_items,
            Duration::from_secs(config.request_timeout_secs),
            Duration::from_secs(config.connect_timeout_secs),
        )
    }

    /// Full listing URL, including the page-size cap.
    pub fn listing_url(&self) -> String {
        format!("{}{}?per_page={}", self.base_url, LISTING_PATH, self.max_items)
    }
}

impl CorpusProvider for HttpCorpusProvider {
    fn name(&self) -> &str {
        "http"
    }

    async fn load(&self) -> Result<Vec<Product>, CorpusError> {
        let url = self.listing_url();
        tracing::debug!(url = %url, "Requesting product listing");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CorpusError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        decode_listing(&body, self.max_items)
    }
}

/// Decode a listing envelope and apply the item cap.
pub(crate) fn decode_listing(body: &str, max_items: usize) -> Result<Vec<Product>, CorpusError> {
    let listing: ProductListResponse = serde_json::from_str(body)?;
    let mut products = listing.products;
    products.truncate(max_items);
    Ok(products)
}
