//! Wire DTOs for the `/api/*` JSON routes.

use serde::Serialize;

use oj_core::domain::{JobInfo, JobState};

#[derive(Debug, Clone, Serialize)]
pub struct StepResultDto {
    pub input: String,
    pub output: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobDto {
    pub id: String,
    pub flow: String,
    pub state: String,
    pub output: Vec<StepResultDto>,
}

impl JobDto {
    /// A freshly started job: always `pending` with no step output yet,
    /// regardless of how far the executor has actually gotten by the time
    /// this response is built.
    pub fn pending(id: impl Into<String>, flow_id: impl Into<String>) -> Self {
        JobDto {
            id: id.into(),
            flow: flow_id.into(),
            state: "pending".to_string(),
            output: Vec::new(),
        }
    }
}

impl From<JobInfo> for JobDto {
    fn from(job: JobInfo) -> Self {
        let state = match job.state {
            JobState::Pending => "pending",
            JobState::Running => "running",
            JobState::Succeeded => "succeeded",
            JobState::Failed => "failed",
        };
        JobDto {
            id: job.id,
            flow: job.flow_id,
            state: state.to_string(),
            output: job
                .steps
                .into_iter()
                .map(|s| StepResultDto {
                    input: s.input,
                    output: String::from_utf8_lossy(&s.output).into_owned(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PingDto {
    pub message: &'static str,
}
