// Process infrastructure adapter.
// Implements: StepRunner (oj-core::port::step_runner)

pub mod subprocess_runner;

pub use subprocess_runner::SubprocessStepRunner;
