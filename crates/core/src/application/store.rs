// Keyed-entity store actor: a single owning task serializes all mutation
// of a `HashMap<K, V>` behind five request channels, so that a caller's
// read-modify-write via `update` never interleaves with any other mutation.

use std::collections::HashMap;
use std::hash::Hash;

use thiserror::Error;
use tokio::sync::oneshot;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store closed")]
    Closed,
}

enum Request<K, V> {
    Create {
        key: K,
        value: V,
        reply: oneshot::Sender<bool>,
    },
    Read {
        key: K,
        reply: oneshot::Sender<Option<V>>,
    },
    Update {
        key: K,
        mutate: Box<dyn FnOnce(V) -> V + Send>,
        reply: oneshot::Sender<bool>,
    },
    Delete {
        key: K,
        reply: oneshot::Sender<bool>,
    },
    Snapshot {
        reply: oneshot::Sender<HashMap<K, V>>,
    },
}

/// Handle to a running store actor. Cloning shares the same underlying map.
#[derive(Clone)]
pub struct KeyedStore<K, V> {
    tx: tokio::sync::mpsc::Sender<Request<K, V>>,
}

impl<K, V> KeyedStore<K, V>
where
    K: Eq + Hash + Clone + Send + 'static,
    V: Clone + Send + 'static,
{
    pub fn new() -> Self {
        let (tx, mut rx) = tokio::sync::mpsc::channel::<Request<K, V>>(256);
        tokio::spawn(async move {
            let mut map: HashMap<K, V> = HashMap::new();
            while let Some(req) = rx.recv().await {
                match req {
                    Request::Create { key, value, reply } => {
                        let created = if map.contains_key(&key) {
                            false
                        } else {
                            map.insert(key, value);
                            true
                        };
                        let _ = reply.send(created);
                    }
                    Request::Read { key, reply } => {
                        let _ = reply.send(map.get(&key).cloned());
                    }
                    Request::Update { key, mutate, reply } => {
                        if let Some(existing) = map.remove(&key) {
                            map.insert(key, mutate(existing));
                            let _ = reply.send(true);
                        } else {
                            let _ = reply.send(false);
                        }
                    }
                    Request::Delete { key, reply } => {
                        let _ = reply.send(map.remove(&key).is_some());
                    }
                    Request::Snapshot { reply } => {
                        let _ = reply.send(map.clone());
                    }
                }
            }
        });
        Self { tx }
    }

    pub async fn create(&self, key: K, value: V) -> Result<bool, StoreError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Request::Create { key, value, reply })
            .await
            .map_err(|_| StoreError::Closed)?;
        rx.await.map_err(|_| StoreError::Closed)
    }

    pub async fn read(&self, key: K) -> Result<Option<V>, StoreError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Request::Read { key, reply })
            .await
            .map_err(|_| StoreError::Closed)?;
        rx.await.map_err(|_| StoreError::Closed)
    }

    pub async fn update<F>(&self, key: K, mutate: F) -> Result<bool, StoreError>
    where
        F: FnOnce(V) -> V + Send + 'static,
    {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Request::Update {
                key,
                mutate: Box::new(mutate),
                reply,
            })
            .await
            .map_err(|_| StoreError::Closed)?;
        rx.await.map_err(|_| StoreError::Closed)
    }

    pub async fn delete(&self, key: K) -> Result<bool, StoreError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Request::Delete { key, reply })
            .await
            .map_err(|_| StoreError::Closed)?;
        rx.await.map_err(|_| StoreError::Closed)
    }

    pub async fn snapshot(&self) -> Result<HashMap<K, V>, StoreError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Request::Snapshot { reply })
            .await
            .map_err(|_| StoreError::Closed)?;
        rx.await.map_err(|_| StoreError::Closed)
    }
}

impl<K, V> Default for KeyedStore<K, V>
where
    K: Eq + Hash + Clone + Send + 'static,
    V: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_then_read() {
        let store: KeyedStore<String, i32> = KeyedStore::new();
        assert!(store.create("a".into(), 1).await.unwrap());
        assert_eq!(store.read("a".into()).await.unwrap(), Some(1));
    }

    #[tokio::test]
    async fn create_is_insert_if_absent() {
        let store: KeyedStore<String, i32> = KeyedStore::new();
        assert!(store.create("a".into(), 1).await.unwrap());
        assert!(!store.create("a".into(), 2).await.unwrap());
        assert_eq!(store.read("a".into()).await.unwrap(), Some(1));
    }

    #[tokio::test]
    async fn update_absent_key_returns_false() {
        let store: KeyedStore<String, i32> = KeyedStore::new();
        assert!(!store.update("a".into(), |v| v + 1).await.unwrap());
    }

    #[tokio::test]
    async fn update_present_key_applies_mutation() {
        let store: KeyedStore<String, i32> = KeyedStore::new();
        store.create("a".into(), 1).await.unwrap();
        assert!(store.update("a".into(), |v| v + 41).await.unwrap());
        assert_eq!(store.read("a".into()).await.unwrap(), Some(42));
    }

    #[tokio::test]
    async fn delete_present_and_absent() {
        let store: KeyedStore<String, i32> = KeyedStore::new();
        store.create("a".into(), 1).await.unwrap();
        assert!(store.delete("a".into()).await.unwrap());
        assert!(!store.delete("a".into()).await.unwrap());
    }

    #[tokio::test]
    async fn snapshot_reflects_prior_writes_only() {
        let store: KeyedStore<String, i32> = KeyedStore::new();
        store.create("a".into(), 1).await.unwrap();
        let snap = store.snapshot().await.unwrap();
        store.create("b".into(), 2).await.unwrap();
        assert_eq!(snap.len(), 1);
        assert!(snap.contains_key("a"));
    }

    #[tokio::test]
    async fn concurrent_creates_for_same_key_yield_exactly_one_success() {
        let store: KeyedStore<String, i32> = KeyedStore::new();
        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move { store.create("k".into(), i).await.unwrap() }));
        }
        let mut successes = 0;
        for h in handles {
            if h.await.unwrap() {
                successes += 1;
            }
        }
        assert_eq!(successes, 1);
    }
}
