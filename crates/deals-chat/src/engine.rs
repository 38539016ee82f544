//! Filter-rank engine.
//!
//! Applies a [`QueryIntent`] to the corpus as a fixed pipeline:
//!
//! 1. price bounds
//! 2. discount intent: keep discount > 20, sort by discount descending
//! 3. budget intent: sort by price ascending
//! 4. top intent: keep discount > 15
//! 5. keywords: keep products whose text contains any keyword
//! 6. truncate
//!
//! Stages whose trigger is unset are skipped and leave the order alone.
//! When both sorts run, the budget sort is applied last and wins. Sorts are
//! stable, so ties keep corpus order and the output is deterministic.

use deals_core::types::Product;

use crate::types::QueryIntent;

/// Upper bound on the number of products returned.
pub const MAX_RESULTS: usize = 8;

/// Discount intent keeps products strictly above this percentage.
pub const DISCOUNT_INTENT_MIN: f64 = 20.0;

/// Top intent keeps products strictly above this percentage.
pub const TOP_INTENT_MIN: f64 = 15.0;

/// Runs the filter-rank pipeline with a result cap of at most [`MAX_RESULTS`].
#[derive(Debug, Clone, Copy)]
pub struct RankingEngine {
    limit: usize,
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self::new(MAX_RESULTS)
    }
}

impl RankingEngine {
    /// Create an engine returning up to `limit` products, capped at [`MAX_RESULTS`].
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.min(MAX_RESULTS),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Rank `corpus` against `intent`. The corpus is never modified.
    pub fn rank(&self, corpus: &[Product], intent: &QueryIntent) -> Vec<Product> {
        let mut working: Vec<&Product> = corpus.iter().collect();

        if let Some(max) = intent.max_price {
            let max = max as f64;
            working.retain(|p| p.price_or_zero() <= max);
        }
        if let Some(min) = intent.min_price {
            let min = min as f64;
            working.retain(|p| p.price_or_zero() >= min);
        }

        if intent.wants_discount {
            working.retain(|p| p.discount_or_zero() > DISCOUNT_INTENT_MIN);
            working.sort_by(|a, b| b.discount_or_zero().total_cmp(&a.discount_or_zero()));
        }

        if intent.wants_budget {
            working.sort_by(|a, b| a.price_or_zero().total_cmp(&b.price_or_zero()));
        }

        if intent.wants_top {
            working.retain(|p| p.discount_or_zero() > TOP_INTENT_MIN);
        }

        if !intent.keywords.is_empty() {
            working.retain(|p| {
                let text = p.search_text();
                intent.keywords.iter().any(|k| text.contains(k.as_str()))
            });
        }

        tracing::debug!(
            corpus = corpus.len(),
            matched = working.len(),
            limit = self.limit,
            "Ranking complete"
        );

        working.into_iter().take(self.limit).cloned().collect()
    }
}

/// Rank with the default cap of [`MAX_RESULTS`].
pub fn rank(corpus: &[Product], intent: &QueryIntent) -> Vec<Product> {
    RankingEngine::default().rank(corpus, intent)
}

// =============================================================================
// Tests
// =============================================================================
