use std::{
    collections::HashMap,
    marker::PhantomData,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use chrono::Utc;
use timeoff_state::{Repository, RepositoryError, RepositoryItem};
use tokio::sync::RwLock;

/// An in-memory [Repository] that persists items as JSON, the way a real
/// document store would. Server timestamps are assigned from the local clock on
/// write. Cloning yields a handle to the same storage, so tests can keep one to
/// inspect after handing the other to the client. Read and write failures can be
/// injected to exercise error paths.
pub struct MemoryRepository<V: RepositoryItem> {
    inner: Arc<Inner>,
    _marker: PhantomData<fn() -> V>,
}

struct Inner {
    store: RwLock<HashMap<String, serde_json::Value>>,
    read_error: Mutex<Option<String>>,
    write_error: Mutex<Option<String>>,
}

impl<V: RepositoryItem> Clone for MemoryRepository<V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _marker: PhantomData,
        }
    }
}

impl<V: RepositoryItem> Default for MemoryRepository<V> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Inner {
                store: RwLock::new(HashMap::new()),
                read_error: Mutex::new(None),
                write_error: Mutex::new(None),
            }),
            _marker: PhantomData,
        }
    }
}

impl<V: RepositoryItem> MemoryRepository<V> {
    /// Make every subsequent read fail with the given error text.
    pub fn fail_reads(&self, message: &str) {
        *self.inner.read_error.lock().expect("Lock should not be poisoned") =
            Some(message.to_string());
    }

    /// Make every subsequent write fail with the given error text.
    pub fn fail_writes(&self, message: &str) {
        *self.inner.write_error.lock().expect("Lock should not be poisoned") =
            Some(message.to_string());
    }

    /// Whether a document exists under the given key.
    pub async fn contains(&self, key: &str) -> bool {
        self.inner.store.read().await.contains_key(key)
    }
}

#[async_trait]
impl<V: RepositoryItem> Repository<V> for MemoryRepository<V> {
    async fn get(&self, key: String) -> Result<Option<V>, RepositoryError> {
        let scripted = self
            .inner
            .read_error
            .lock()
            .expect("Lock should not be poisoned")
            .clone();
        if let Some(message) = scripted {
            return Err(RepositoryError::Internal(message));
        }

        match self.inner.store.read().await.get(&key) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: String, value: V) -> Result<(), RepositoryError> {
        let scripted = self
            .inner
            .write_error
            .lock()
            .expect("Lock should not be poisoned")
            .clone();
        if let Some(message) = scripted {
            return Err(RepositoryError::Internal(message));
        }

        let mut value = value;
        value.assign_server_timestamps(Utc::now());
        let json = serde_json::to_value(&value)?;
        self.inner.store.write().await.insert(key, json);
        Ok(())
    }
}
