use deals_core::error::DealsError;
use thiserror::Error;

/// Errors raised while loading the product corpus.
#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("http error: {0}")]
    Http(String),
    #[error("backend returned status {0}")]
    Status(u16),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for CorpusError {
    fn from(err: reqwest::Error) -> Self {
        CorpusError::Http(err.to_string())
    }
}

impl From<serde_json::Error> for CorpusError {
    fn from(err: serde_json::Error) -> Self {
        CorpusError::Decode(err.to_string())
    }
}

impl From<CorpusError> for DealsError {
    fn from(err: CorpusError) -> Self {
        DealsError::Corpus(err.to_string())
    }
}
