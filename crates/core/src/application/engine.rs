// Engine façade: owns the stores, the bounded job queue, and the lifecycle
// of the scheduler and executor workers.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::info;

use crate::application::executor::{Executor, JobQueueReceiver, QueuedJob};
use crate::application::flow_store::FlowStore;
use crate::application::job_store::JobStore;
use crate::application::scheduler::Scheduler;
use crate::application::shutdown::{shutdown_channel, ShutdownSender};
use crate::domain::{FlowId, JobId, JobInfo};
use crate::port::{IdProvider, StepRunner, TimeProvider};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("flow not found: {0}")]
    FlowNotFound(FlowId),

    #[error("job queue closed")]
    QueueClosed,

    #[error("store closed")]
    StoreClosed,
}

pub struct EngineConfig {
    pub queue_capacity: usize,
    pub executor_workers: usize,
    pub scheduler_poll_interval: std::time::Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 1024,
            executor_workers: 1,
            scheduler_poll_interval: std::time::Duration::from_secs(5),
        }
    }
}

/// Shared wiring used by both `Engine::start_job` and the scheduler, so a
/// time-triggered run and an externally-requested run go through the exact
/// same path.
#[derive(Clone)]
pub(crate) struct JobStarter {
    pub flow_store: FlowStore,
    pub job_store: JobStore,
    pub id_provider: Arc<dyn IdProvider>,
    pub queue_tx: mpsc::Sender<QueuedJob>,
}

impl JobStarter {
    pub(crate) async fn start_job(&self, flow_id: &str) -> Result<JobId, EngineError> {
        let flow = self
            .flow_store
            .get(flow_id)
            .await
            .map_err(|_| EngineError::StoreClosed)?
            .ok_or_else(|| EngineError::FlowNotFound(flow_id.to_string()))?;

        let job_id = format!("{}:{}", flow.id, self.id_provider.generate_id());
        let job = JobInfo::new(job_id.clone(), flow.id.clone(), flow.steps.len());

        self.job_store
            .create(job)
            .await
            .map_err(|_| EngineError::StoreClosed)?;

        self.queue_tx
            .send(QueuedJob {
                job_id: job_id.clone(),
                flow,
            })
            .await
            .map_err(|_| EngineError::QueueClosed)?;

        Ok(job_id)
    }
}

pub struct Engine {
    starter: JobStarter,
    job_store: JobStore,
    shutdown_tx: ShutdownSender,
    executor_handles: Vec<JoinHandle<()>>,
    scheduler_handle: JoinHandle<()>,
}

impl Engine {
    pub fn start(
        flow_store: FlowStore,
        job_store: JobStore,
        id_provider: Arc<dyn IdProvider>,
        time_provider: Arc<dyn TimeProvider>,
        step_runner: Arc<dyn StepRunner>,
        config: EngineConfig,
    ) -> Self {
        let (queue_tx, queue_rx) = mpsc::channel(config.queue_capacity);
        let queue_rx: JobQueueReceiver = Arc::new(Mutex::new(queue_rx));

        let starter = JobStarter {
            flow_store: flow_store.clone(),
            job_store: job_store.clone(),
            id_provider,
            queue_tx,
        };

        let (shutdown_tx, shutdown_token) = shutdown_channel();

        let mut executor_handles = Vec::with_capacity(config.executor_workers);
        for _ in 0..config.executor_workers {
            let executor = Executor::new(job_store.clone(), step_runner.clone(), queue_rx.clone());
            let token = shutdown_token.clone();
            executor_handles.push(tokio::spawn(async move { executor.run(token).await }));
        }

        let scheduler = Scheduler::new(
            flow_store,
            starter.clone(),
            time_provider,
            config.scheduler_poll_interval,
        );
        let scheduler_handle = tokio::spawn(async move { scheduler.run(shutdown_token).await });

        Self {
            starter,
            job_store,
            shutdown_tx,
            executor_handles,
            scheduler_handle,
        }
    }

    pub async fn start_job(&self, flow_id: &str) -> Result<JobId, EngineError> {
        self.starter.start_job(flow_id).await
    }

    pub async fn get_job(&self, job_id: &str) -> Option<JobInfo> {
        self.job_store.get(job_id).await.ok().flatten()
    }

    /// Snapshot of all known flows, for the dashboard.
    pub async fn flows(&self) -> Vec<crate::domain::Flow> {
        self.starter
            .flow_store
            .snapshot()
            .await
            .map(|m| m.into_values().collect())
            .unwrap_or_default()
    }

    /// Snapshot of all known jobs, for the dashboard.
    pub async fn jobs(&self) -> Vec<JobInfo> {
        self.job_store
            .snapshot()
            .await
            .map(|m| m.into_values().collect())
            .unwrap_or_default()
    }

    /// Signals the scheduler and executor workers to stop, and waits
    /// (bounded) for them to drain. Does not cancel an in-flight step.
    pub async fn close(self, timeout: std::time::Duration) {
        self.shutdown_tx.shutdown();
        info!("engine shutdown signaled, waiting for workers to drain");

        let _ = tokio::time::timeout(timeout, self.scheduler_handle).await;
        for handle in self.executor_handles {
            let _ = tokio::time::timeout(timeout, handle).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Flow, JobState, Step};
    use crate::port::id_provider::SequentialIdProvider;
    use crate::port::step_runner::mocks::MockStepRunner;
    use crate::port::time_provider::SystemTimeProvider;

    fn engine_with(flows: Vec<Flow>) -> (Engine, FlowStore) {
        let flow_store = FlowStore::new();
        let job_store = JobStore::new();
        let id_provider: Arc<dyn IdProvider> = Arc::new(SequentialIdProvider::new());
        let time_provider: Arc<dyn TimeProvider> = Arc::new(SystemTimeProvider);
        let step_runner: Arc<dyn StepRunner> = Arc::new(MockStepRunner::always_succeed(b"ok".to_vec()));

        let engine = Engine::start(
            flow_store.clone(),
            job_store,
            id_provider,
            time_provider,
            step_runner,
            EngineConfig {
                executor_workers: 1,
                ..Default::default()
            },
        );

        (engine, flow_store)
    }

    #[tokio::test]
    async fn start_job_on_unknown_flow_errors() {
        let (engine, _flows) = engine_with(vec![]);
        let err = engine.start_job("nonexistent").await.unwrap_err();
        assert_eq!(err, EngineError::FlowNotFound("nonexistent".into()));
    }

    #[tokio::test]
    async fn start_job_then_get_job_observes_completion() {
        let flow = Flow::new("p.foo", vec![Step::new(vec!["echo".into(), "hi".into()])], None);
        let (engine, flows) = engine_with(vec![]);
        flows.create(flow).await.unwrap();

        let job_id = engine.start_job("p.foo").await.unwrap();

        // Poll briefly for the async executor to drain the one job.
        let mut job = engine.get_job(&job_id).await;
        for _ in 0..50 {
            if job.as_ref().map(|j| j.state.is_terminal()).unwrap_or(false) {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            job = engine.get_job(&job_id).await;
        }

        let job = job.expect("job should exist");
        assert_eq!(job.state, JobState::Succeeded);
    }

    #[tokio::test]
    async fn concurrent_start_job_yields_distinct_ids() {
        let flow = Flow::new("p.foo", vec![Step::new(vec!["echo".into()])], None);
        let (engine, flows) = engine_with(vec![]);
        flows.create(flow).await.unwrap();

        let engine = Arc::new(engine);
        let mut handles = Vec::new();
        for _ in 0..8 {
            let engine = engine.clone();
            handles.push(tokio::spawn(async move { engine.start_job("p.foo").await.unwrap() }));
        }
        let mut ids = std::collections::HashSet::new();
        for h in handles {
            ids.insert(h.await.unwrap());
        }
        assert_eq!(ids.len(), 8);
    }
}
