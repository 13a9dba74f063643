// Step Runner Port
// Abstraction for running one step's argv as a child process.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum StepError {
    #[error("Step is empty")]
    EmptyStep,

    #[error("{0}")]
    SpawnFailed(String),
}

/// Runs a single step (one argv) to completion and returns its combined
/// stdout+stderr. Implementations:
/// - `SubprocessStepRunner` (crate `oj-process`): spawns a real child process
/// - `mocks::MockStepRunner`: scripted behavior for tests
#[async_trait]
pub trait StepRunner: Send + Sync {
    async fn run(&self, args: &[String]) -> Result<Vec<u8>, StepError>;
}

pub mod mocks {
    use super::*;
    use std::sync::Mutex;

    /// Scripted behavior for one `run` call.
    #[derive(Clone)]
    pub enum MockBehavior {
        Output(Vec<u8>),
        Fail(String),
    }

    /// Replays a fixed sequence of behaviors, one per call, repeating the
    /// last entry once the sequence is exhausted.
    pub struct MockStepRunner {
        behaviors: Vec<MockBehavior>,
        calls: Mutex<Vec<Vec<String>>>,
    }

    impl MockStepRunner {
        pub fn new(behaviors: Vec<MockBehavior>) -> Self {
            Self {
                behaviors,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn always_succeed(output: impl Into<Vec<u8>>) -> Self {
            Self::new(vec![MockBehavior::Output(output.into())])
        }

        pub fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl StepRunner for MockStepRunner {
        async fn run(&self, args: &[String]) -> Result<Vec<u8>, StepError> {
            if args.is_empty() {
                return Err(StepError::EmptyStep);
            }
            let mut calls = self.calls.lock().unwrap();
            let index = calls.len().min(self.behaviors.len().saturating_sub(1));
            calls.push(args.to_vec());
            match &self.behaviors[index] {
                MockBehavior::Output(bytes) => Ok(bytes.clone()),
                MockBehavior::Fail(msg) => Err(StepError::SpawnFailed(msg.clone())),
            }
        }
    }
}
