//! soko SDK - Rust client library for the daemon's HTTP API.
//!
//! # Example
//!
//! ```no_run
//! use soko_sdk::SokoClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SokoClient::new("http://127.0.0.1:8000");
//!     let job = client.run_flow("project.build").await?;
//!     println!("started job {}", job.id);
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::SokoClient;
pub use error::{Result, SdkError};
pub use types::{JobDto, StepResultDto};
