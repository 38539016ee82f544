//! Conversation controller.
//!
//! Owns the message log for one session and serialises submissions: while
//! an answer is being prepared, further submissions are rejected without
//! touching the log. Every accepted user message gets exactly one assistant
//! reply appended after it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use deals_core::config::ChatConfig;
use deals_core::types::{ConversationMessage, Product};

use crate::error::ChatError;
use crate::strategy::{AnswerStrategy, HeuristicStrategy};

/// Assistant message every conversation starts with.
pub const GREETING: &str = "Hello! I can help you find the best electronics deals. \
Ask me about specific products, brands, or price ranges. For example: \
\"What are the best TVs under 5000 Dhs?\" or \"Show me Samsung smartphones\"";

/// Reply appended when the strategy fails.
pub const ERROR_REPLY: &str = "Sorry, something went wrong while looking for deals. Please try again.";

/// Result of [`Conversation::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The utterance was logged and answered.
    Accepted { reply: ConversationMessage },
    /// Blank input; nothing was logged.
    RejectedEmpty,
    /// Another submission is in flight; nothing was logged.
    RejectedBusy,
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted { .. })
    }
}

/// Clears the busy flag when dropped, including on cancellation.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

// =============================================================================
// Conversation
// =============================================================================

/// A single chat session over a read-only corpus.
pub struct Conversation {
    messages: Mutex<Vec<ConversationMessage>>,
    busy: AtomicBool,
    corpus: Arc<[Product]>,
    strategy: Box<dyn AnswerStrategy>,
    thinking_delay: Duration,
    enabled: bool,
}

impl Conversation {
    /// Start a session seeded with the greeting.
    pub fn new(
        corpus: Arc<[Product]>,
        strategy: Box<dyn AnswerStrategy>,
        thinking_delay: Duration,
    ) -> Self {
        Self {
            messages: Mutex::new(vec![ConversationMessage::assistant(GREETING)]),
            busy: AtomicBool::new(false),
            corpus,
            strategy,
            thinking_delay,
            enabled: true,
        }
    }

    /// Heuristic session configured from `[chat]`.
    pub fn from_config(corpus: Arc<[Product]>, config: &ChatConfig) -> Self {
        let mut conversation = Self::new(
            corpus,
            Box::new(HeuristicStrategy::from_config(config)),
            Duration::from_millis(config.thinking_delay_ms),
        );
        conversation.enabled = config.enabled;
        conversation
    }

    /// Submit a user utterance.
    ///
    /// Blank input and submissions made while another is in flight are
    /// rejected without side effects. Otherwise the trimmed utterance is
    /// logged, the thinking delay elapses, and one reply is logged.
    pub async fn submit(&self, utterance: &str) -> Result<SubmitOutcome, ChatError> {
        if !self.enabled {
            return Err(ChatError::Disabled);
        }

        let text = utterance.trim();
        if text.is_empty() {
            return Ok(SubmitOutcome::RejectedEmpty);
        }

        if self
            .busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            tracing::debug!("Submission rejected, answer already in progress");
            return Ok(SubmitOutcome::RejectedBusy);
        }
        let _guard = BusyGuard(&self.busy);

        self.log().push(ConversationMessage::user(text));

        tokio::time::sleep(self.thinking_delay).await;

        let content = match self.strategy.answer(text, &self.corpus).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(strategy = self.strategy.name(), error = %e, "Answer failed");
                ERROR_REPLY.to_string()
            }
        };

        let reply = ConversationMessage::assistant(content);
        self.log().push(reply.clone());
        tracing::debug!(messages = self.len(), "Reply appended");

        Ok(SubmitOutcome::Accepted { reply })
    }

    /// Snapshot of the log in append order.
    pub fn messages(&self) -> Vec<ConversationMessage> {
        self.log().clone()
    }

    pub fn len(&self) -> usize {
        self.log().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log().is_empty()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn corpus_len(&self) -> usize {
        self.corpus.len()
    }

    // Each push is a single call, so a poisoned log is still consistent.
    fn log(&self) -> MutexGuard<'_, Vec<ConversationMessage>> {
        self.messages.lock().unwrap_or_else(|e| e.into_inner())
    }
}

// =============================================================================
// Tests
// =============================================================================
