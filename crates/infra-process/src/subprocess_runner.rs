// StepRunner implementation backed by a real child process.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use oj_core::port::{StepError, StepRunner};

/// Spawns `args[0]` with `args[1..]`, capturing combined stdout+stderr.
pub struct SubprocessStepRunner;

impl SubprocessStepRunner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SubprocessStepRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StepRunner for SubprocessStepRunner {
    async fn run(&self, args: &[String]) -> Result<Vec<u8>, StepError> {
        if args.is_empty() {
            return Err(StepError::EmptyStep);
        }

        let program = &args[0];
        let rest = &args[1..];

        debug!(program = %program, args = ?rest, "spawning step");

        let output = Command::new(program)
            .args(rest)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| StepError::SpawnFailed(e.to_string()))?;

        let mut combined = output.stdout;
        combined.extend_from_slice(&output.stderr);

        if !output.status.success() {
            let code = output
                .status
                .code()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "signal".to_string());
            return Err(StepError::SpawnFailed(format!(
                "exit status: {code}\n{}",
                String::from_utf8_lossy(&combined)
            )));
        }

        Ok(combined)
    }
}
