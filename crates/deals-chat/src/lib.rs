//! Deals chat assistant.
//!
//! Interprets free-text shopping requests, ranks the product corpus against
//! them and renders the result as a chat reply. [`Conversation`] wires the
//! pieces into a single-flight session.

pub mod conversation;
pub mod engine;
pub mod error;
pub mod interpreter;
pub mod response;
pub mod strategy;
pub mod types;

pub use conversation::{Conversation, SubmitOutcome, ERROR_REPLY, GREETING};
pub use engine::{rank, RankingEngine, MAX_RESULTS};
pub use error::ChatError;
pub use interpreter::{interpret, QueryInterpreter};
pub use response::{format_response, ResponseFormatter, NO_RESULTS_MESSAGE};
pub use strategy::{AnswerStrategy, HeuristicStrategy};
pub use types::QueryIntent;
