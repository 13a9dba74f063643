// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("invalid job state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("step index {index} out of range for {len} steps")]
    StepIndexOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, DomainError>;
