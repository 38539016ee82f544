//! Answer strategies.
//!
//! A strategy turns one user utterance plus the corpus into the text of one
//! assistant reply. The heuristic strategy is the only one shipped; a
//! model-backed strategy would implement the same trait.

use async_trait::async_trait;

use deals_core::config::ChatConfig;
use deals_core::types::Product;

use crate::engine::RankingEngine;
use crate::error::ChatError;
use crate::interpreter::QueryInterpreter;
use crate::response::ResponseFormatter;

/// Produces the assistant reply for an utterance.
#[async_trait]
pub trait AnswerStrategy: Send + Sync {
    /// Short label used in log lines.
    fn name(&self) -> &str;

    /// Answer `utterance` using `corpus`.
    async fn answer(&self, utterance: &str, corpus: &[Product]) -> Result<String, ChatError>;
}

/// Rule-based strategy: interpret, rank, format.
#[derive(Debug, Clone, Default)]
pub struct HeuristicStrategy {
    interpreter: QueryInterpreter,
    engine: RankingEngine,
    formatter: ResponseFormatter,
}

impl HeuristicStrategy {
    pub fn new(engine: RankingEngine, formatter: ResponseFormatter) -> Self {
        Self {
            interpreter: QueryInterpreter::new(),
            engine,
            formatter,
        }
    }

    pub fn from_config(config: &ChatConfig) -> Self {
        Self::new(
            RankingEngine::new(config.max_results),
            ResponseFormatter::new(config.currency.clone()),
        )
    }

    /// Synchronous form of [`AnswerStrategy::answer`]; the heuristic never fails.
    pub fn reply(&self, utterance: &str, corpus: &[Product]) -> String {
        let intent = self.interpreter.interpret(utterance);
        tracing::debug!(
            max_price = ?intent.max_price,
            min_price = ?intent.min_price,
            discount = intent.wants_discount,
            budget = intent.wants_budget,
            top = intent.wants_top,
            keywords = intent.keywords.len(),
            has_signal = intent.has_signal(),
            "Interpreted query"
        );
        let results = self.engine.rank(corpus, &intent);
        self.formatter.format(utterance, &results)
    }
}

#[async_trait]
impl AnswerStrategy for HeuristicStrategy {
    fn name(&self) -> &str {
        "heuristic"
    }

    async fn answer(&self, utterance: &str, corpus: &[Product]) -> Result<String, ChatError> {
        Ok(self.reply(utterance, corpus))
    }
}
