// Job domain model: one execution attempt of a flow, driven to a terminal
// state by a stream of `JobEvent`s applied through `apply`.

use std::fmt;

use crate::domain::FlowId;

pub type JobId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Pending,
    Running,
    Succeeded,
    Failed,
}

impl JobState {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobState::Succeeded | JobState::Failed)
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobState::Pending => "pending",
            JobState::Running => "running",
            JobState::Succeeded => "succeeded",
            JobState::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

/// Captured input/output for a single step, populated once the step runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepInfo {
    pub input: String,
    pub output: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct JobInfo {
    pub id: JobId,
    pub flow_id: FlowId,
    pub state: JobState,
    pub current_step: usize,
    pub steps: Vec<StepInfo>,
}

impl JobInfo {
    /// A freshly created job: Pending, no step has run, `steps` sized to the
    /// flow's step count (invariant I1).
    pub fn new(id: impl Into<JobId>, flow_id: impl Into<FlowId>, step_count: usize) -> Self {
        Self {
            id: id.into(),
            flow_id: flow_id.into(),
            state: JobState::Pending,
            current_step: 0,
            steps: vec![StepInfo::default(); step_count],
        }
    }
}

/// Update messages the executor publishes to the job store. Replaces the
/// reflective update-interface pattern with an exhaustively-matchable enum.
#[derive(Debug, Clone)]
pub enum JobEvent {
    /// The job has begun executing.
    Started,
    /// Step `index` ran; `state` is the job's state after this step
    /// (`Running` if more steps remain and it succeeded, `Failed` if it
    /// errored).
    StepRan {
        index: usize,
        input: String,
        output: Vec<u8>,
        state: JobState,
    },
    /// All steps completed without error.
    Succeeded,
}

/// Applies one event to a job, returning the updated value. Runs inside the
/// job store's serialization domain (see `application::store`), so this
/// function must be a pure transformation with no side effects of its own.
pub fn apply(mut job: JobInfo, event: JobEvent) -> JobInfo {
    match event {
        JobEvent::Started => {
            job.state = JobState::Running;
        }
        JobEvent::StepRan {
            index,
            input,
            output,
            state,
        } => {
            if let Some(slot) = job.steps.get_mut(index) {
                *slot = StepInfo { input, output };
            }
            job.current_step = index;
            job.state = state;
        }
        JobEvent::Succeeded => {
            job.state = JobState::Succeeded;
        }
    }
    job
}
