// Central Error Type for the Application

use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    #[error("flow not found: {0}")]
    FlowNotFound(String),

    #[error("store closed")]
    StoreClosed,

    #[error("step error: {0}")]
    Step(#[from] crate::port::StepError),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
