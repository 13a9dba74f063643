// Executor: drains the job queue and drives each job through its steps,
// publishing `JobEvent`s back to the JobStore as it goes.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};

use crate::application::job_store::JobStore;
use crate::application::shutdown::ShutdownToken;
use crate::domain::{Flow, JobEvent, JobId, JobState};
use crate::port::{StepError, StepRunner};

pub struct QueuedJob {
    pub job_id: JobId,
    pub flow: Flow,
}

/// Receiving half of the job queue, shared across executor workers: only
/// one worker's `recv` wins a given job, so a job is processed exactly once.
pub type JobQueueReceiver = Arc<Mutex<mpsc::Receiver<QueuedJob>>>;

pub struct Executor {
    job_store: JobStore,
    step_runner: Arc<dyn StepRunner>,
    queue_rx: JobQueueReceiver,
}

impl Executor {
    pub fn new(job_store: JobStore, step_runner: Arc<dyn StepRunner>, queue_rx: JobQueueReceiver) -> Self {
        Self {
            job_store,
            step_runner,
            queue_rx,
        }
    }

    /// Runs until the queue is closed or shutdown is signaled. Does not
    /// interrupt a step already in flight; the shutdown check happens
    /// between steps and between jobs.
    pub async fn run(mut self, mut shutdown: ShutdownToken) {
        loop {
            tokio::select! {
                biased;
                _ = shutdown.wait(), if !shutdown.is_shutdown() => {
                    info!("executor received shutdown signal");
                    break;
                }
                job = async { self.queue_rx.lock().await.recv().await } => {
                    match job {
                        Some(job) => self.run_job(job, &shutdown).await,
                        None => {
                            debug!("job queue closed, executor exiting");
                            break;
                        }
                    }
                }
            }
        }
    }

    async fn run_job(&self, job: QueuedJob, shutdown: &ShutdownToken) {
        let QueuedJob { job_id, flow } = job;

        if self
            .job_store
            .apply_event(&job_id, JobEvent::Started)
            .await
            .is_err()
        {
            warn!(job_id = %job_id, "job store closed before job could start");
            return;
        }

        for (index, step) in flow.steps.iter().enumerate() {
            if shutdown.is_shutdown() {
                info!(job_id = %job_id, step = index, "shutting down before remaining steps ran");
                return;
            }

            let input = step.input_repr();
            let result = self.step_runner.run(&step.args).await;

            let (output, state) = match result {
                Ok(bytes) => (bytes, JobState::Running),
                Err(err) => (format_step_failure(&err), JobState::Failed),
            };

            let is_failure = state == JobState::Failed;

            let _ = self
                .job_store
                .apply_event(
                    &job_id,
                    JobEvent::StepRan {
                        index,
                        input,
                        output,
                        state,
                    },
                )
                .await;

            if is_failure {
                return;
            }
        }

        let _ = self.job_store.apply_event(&job_id, JobEvent::Succeeded).await;
    }
}

fn format_step_failure(err: &StepError) -> Vec<u8> {
    format!("Step failed with error:\n  {err}\n\n").into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Flow, Step};
    use crate::port::step_runner::mocks::{MockBehavior, MockStepRunner};

    async fn run_one(flow: Flow, runner: MockStepRunner) -> crate::domain::JobInfo {
        let job_store = JobStore::new();
        let job_id = format!("{}:1", flow.id);
        job_store
            .create(crate::domain::JobInfo::new(
                job_id.clone(),
                flow.id.clone(),
                flow.steps.len(),
            ))
            .await
            .unwrap();

        let (tx, rx) = mpsc::channel(1);
        tx.send(QueuedJob {
            job_id: job_id.clone(),
            flow,
        })
        .await
        .unwrap();
        drop(tx);

        let executor = Executor::new(job_store.clone(), Arc::new(runner), Arc::new(Mutex::new(rx)));
        let (_sender, token) = crate::application::shutdown::shutdown_channel();
        executor.run(token).await;

        job_store.get(&job_id).await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn successful_flow_reaches_succeeded() {
        let flow = Flow::new(
            "f",
            vec![Step::new(vec!["echo".into(), "hi".into()])],
            None,
        );
        let runner = MockStepRunner::always_succeed(b"hi\n".to_vec());
        let job = run_one(flow, runner).await;
        assert_eq!(job.state, JobState::Succeeded);
        assert_eq!(job.steps[0].input, "echo hi");
        assert_eq!(job.steps[0].output, b"hi\n");
    }

    #[tokio::test]
    async fn failing_step_marks_job_failed_and_stops() {
        let flow = Flow::new(
            "f",
            vec![
                Step::new(vec!["false".into()]),
                Step::new(vec!["echo".into(), "never".into()]),
            ],
            None,
        );
        let runner =
            MockStepRunner::new(vec![MockBehavior::Fail("exit status: 1".into())]);
        let job = run_one(flow, runner).await;
        assert_eq!(job.state, JobState::Failed);
        assert_eq!(job.current_step, 0);
        assert!(String::from_utf8_lossy(&job.steps[0].output)
            .starts_with("Step failed with error:\n  "));
        assert!(job.steps[1].input.is_empty());
    }

    #[tokio::test]
    async fn empty_step_fails_without_spawning() {
        let flow = Flow::new("f", vec![Step::new(vec![])], None);
        let runner = MockStepRunner::always_succeed(Vec::new());
        let job = run_one(flow, runner).await;
        assert_eq!(job.state, JobState::Failed);
        assert!(String::from_utf8_lossy(&job.steps[0].output).contains("Step is empty"));
    }

    #[tokio::test]
    async fn zero_step_flow_succeeds_immediately() {
        let flow = Flow::new("f", vec![], None);
        let runner = MockStepRunner::always_succeed(Vec::new());
        let job = run_one(flow, runner).await;
        assert_eq!(job.state, JobState::Succeeded);
        assert!(job.steps.is_empty());
    }
}
