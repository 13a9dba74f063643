// JobStore: job records keyed by JobId, mutated exclusively through
// `JobEvent`s applied via `domain::job::apply`.

use crate::application::store::{KeyedStore, StoreError};
use crate::domain::{apply, JobEvent, JobId, JobInfo};

#[derive(Clone)]
pub struct JobStore {
    inner: KeyedStore<JobId, JobInfo>,
}

impl JobStore {
    pub fn new() -> Self {
        Self {
            inner: KeyedStore::new(),
        }
    }

    pub async fn create(&self, job: JobInfo) -> Result<bool, StoreError> {
        self.inner.create(job.id.clone(), job).await
    }

    pub async fn get(&self, id: &str) -> Result<Option<JobInfo>, StoreError> {
        self.inner.read(id.to_string()).await
    }

    /// Applies `event` to the job's current value. Returns `false` if the
    /// job does not exist (it should always exist: the executor only
    /// publishes events for jobs it dequeued, and jobs are never deleted).
    pub async fn apply_event(&self, id: &str, event: JobEvent) -> Result<bool, StoreError> {
        self.inner
            .update(id.to_string(), move |job| apply(job, event))
            .await
    }

    pub async fn snapshot(&self) -> Result<std::collections::HashMap<JobId, JobInfo>, StoreError> {
        self.inner.snapshot().await
    }
}

impl Default for JobStore {
    fn default() -> Self {
        Self::new()
    }
}
