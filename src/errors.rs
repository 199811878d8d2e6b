use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to encode data file: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write data file: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons a tip could not be produced. Never shown to the user.
#[derive(Debug, Error)]
pub enum TipError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("service answered with HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("empty response")]
    Empty,
    #[error("timed out after {0:?}")]
    Timeout(std::time::Duration),
}
