use std::collections::BTreeSet;

use serde::Serialize;

/// Structured reading of a free-text shopping request.
///
/// Derived fresh for every utterance and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryIntent {
    /// Inclusive upper price bound ("under N").
    pub max_price: Option<u64>,
    /// Inclusive lower price bound ("above N" / "over N").
    pub min_price: Option<u64>,
    /// Mentions discounts, sales or deals.
    pub wants_discount: bool,
    /// Mentions cheap, budget or affordable.
    pub wants_budget: bool,
    /// Mentions best or top.
    pub wants_top: bool,
    /// Remaining significant tokens, matched against product text.
    pub keywords: BTreeSet<String>,
}

impl QueryIntent {
    /// Whether the intent constrains the corpus at all.
    pub fn has_signal(&self) -> bool {
        self.max_price.is_some()
            || self.min_price.is_some()
            || self.wants_discount
            || self.wants_budget
            || self.wants_top
            || !self.keywords.is_empty()
    }
}
