//! SDK Error Types

use thiserror::Error;

/// SDK Result type
pub type Result<T> = std::result::Result<T, SdkError>;

/// SDK Error
#[derive(Debug, Error)]
pub enum SdkError {
    #[error("flow not found: {0}")]
    FlowNotFound(String),

    #[error("job not found: {0}")]
    JobNotFound(String),

    #[error("unexpected response: HTTP {0}")]
    UnexpectedStatus(reqwest::StatusCode),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
