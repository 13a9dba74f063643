// Core job-engine logic & ports — flow/job domain model, stores, executor,
// scheduler, and the engine façade. No infrastructure dependencies
// (ADR-001: Hexagonal Architecture): no process spawning, no HTTP, no file
// I/O. Those live in oj-process, oj-api, and oj-catalog.

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{AppError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
