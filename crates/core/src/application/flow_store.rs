// FlowStore: the catalog's flows, keyed by FlowId. Populated once at
// startup and treated as read-mostly thereafter.

use crate::application::store::{KeyedStore, StoreError};
use crate::domain::{Flow, FlowId};

#[derive(Clone)]
pub struct FlowStore {
    inner: KeyedStore<FlowId, Flow>,
}

impl FlowStore {
    pub fn new() -> Self {
        Self {
            inner: KeyedStore::new(),
        }
    }

    pub async fn create(&self, flow: Flow) -> Result<bool, StoreError> {
        self.inner.create(flow.id.clone(), flow).await
    }

    pub async fn get(&self, id: &str) -> Result<Option<Flow>, StoreError> {
        self.inner.read(id.to_string()).await
    }

    pub async fn snapshot(&self) -> Result<std::collections::HashMap<FlowId, Flow>, StoreError> {
        self.inner.snapshot().await
    }
}

impl Default for FlowStore {
    fn default() -> Self {
        Self::new()
    }
}
