// Flow domain model: a named, ordered sequence of steps with an optional schedule.

use crate::domain::Schedule;

/// Identifies a flow uniquely within a catalog, e.g. `"project.build"`.
pub type FlowId = String;

/// A single command to run as a child process. `args` is the full argv,
/// `args[0]` is the program name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub args: Vec<String>,
}

impl Step {
    pub fn new(args: Vec<String>) -> Self {
        Self { args }
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Space-joined argv, used as the recorded `StepInfo::input`.
    pub fn input_repr(&self) -> String {
        self.args.join(" ")
    }
}

#[derive(Debug, Clone)]
pub struct Flow {
    pub id: FlowId,
    pub steps: Vec<Step>,
    pub schedule: Option<Schedule>,
}

impl Flow {
    pub fn new(id: impl Into<FlowId>, steps: Vec<Step>, schedule: Option<Schedule>) -> Self {
        Self {
            id: id.into(),
            steps,
            schedule,
        }
    }
}
