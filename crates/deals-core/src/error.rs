use thiserror::Error;

/// Top-level error type for the deals assistant.
///
/// Subsystem crates define their own error types and implement
/// `From<SubsystemError> for DealsError` so that `?` works across crate
/// boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DealsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Corpus error: {0}")]
    Corpus(String),
}

impl From<toml::de::Error> for DealsError {
    fn from(err: toml::de::Error) -> Self {
        DealsError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for DealsError {
    fn from(err: toml::ser::Error) -> Self {
        DealsError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for DealsError {
    fn from(err: serde_json::Error) -> Self {
        DealsError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for deals operations.
pub type Result<T> = std::result::Result<T, DealsError>;
