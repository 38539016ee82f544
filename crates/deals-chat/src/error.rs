//! Error types for the chat assistant.

/// Errors from answering a chat message.
///
/// Blank input and busy rejections are not errors; see
/// [`SubmitOutcome`](crate::conversation::SubmitOutcome).
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("chat is disabled")]
    Disabled,
    #[error("strategy error: {0}")]
    Strategy(String),
}
