// Scheduler: a minute-tick loop that snapshots the flow set once per
// wall-clock minute change and starts a run for every flow whose schedule
// matches.

use std::time::Duration;

use tracing::{debug, info};

use crate::application::engine::JobStarter;
use crate::application::flow_store::FlowStore;
use crate::port::TimeProvider;
use std::sync::Arc;

use crate::application::shutdown::ShutdownToken;

pub struct Scheduler {
    flow_store: FlowStore,
    starter: JobStarter,
    time_provider: Arc<dyn TimeProvider>,
    poll_interval: Duration,
}

impl Scheduler {
    pub(crate) fn new(
        flow_store: FlowStore,
        starter: JobStarter,
        time_provider: Arc<dyn TimeProvider>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            flow_store,
            starter,
            time_provider,
            poll_interval,
        }
    }

    pub async fn run(self, mut shutdown: ShutdownToken) {
        let mut last_minute: Option<u32> = None;
        loop {
            tokio::select! {
                biased;
                _ = shutdown.wait(), if !shutdown.is_shutdown() => {
                    info!("scheduler received shutdown signal");
                    break;
                }
                _ = tokio::time::sleep(self.poll_interval) => {
                    last_minute = self.tick(last_minute).await;
                }
            }
        }
    }

    async fn tick(&self, last_minute: Option<u32>) -> Option<u32> {
        use chrono::Timelike;

        let now = self.time_provider.now();
        let minute = now.minute();
        if last_minute == Some(minute) {
            return last_minute;
        }

        let flows = match self.flow_store.snapshot().await {
            Ok(flows) => flows,
            Err(_) => return Some(minute),
        };

        for flow in flows.values() {
            let Some(schedule) = &flow.schedule else {
                continue;
            };
            if schedule.matches(now) {
                match self.starter.start_job(&flow.id).await {
                    Ok(job_id) => info!(flow_id = %flow.id, job_id = %job_id, "scheduled run started"),
                    Err(err) => debug!(flow_id = %flow.id, error = %err, "scheduled run could not be started"),
                }
            }
        }

        Some(minute)
    }
}
