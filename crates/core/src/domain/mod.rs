// Domain Layer - Pure business logic and entities

pub mod error;
pub mod flow;
pub mod job;
pub mod schedule;

// Re-exports
pub use error::DomainError;
pub use flow::{Flow, FlowId, Step};
pub use job::{apply, JobEvent, JobId, JobInfo, JobState, StepInfo};
pub use schedule::Schedule;
