//! In-memory object store for tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::storage::ObjectStore;

/// Stores object bytes in a `BTreeMap` protected by a `Mutex`. The map's key
/// ordering gives `list` a stable, sorted output, which keeps tests
/// deterministic without any external dependencies.
#[derive(Default)]
pub struct InMemoryObjectStore {
    objects: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put(&self, key: &str, data: &[u8]) -> Result<()> {
        self.objects
            .lock()
            .map_err(|e| Error::Internal(format!("lock poisoned: {e}")))?
            .insert(key.to_string(), data.to_vec());
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let guard = self
            .objects
            .lock()
            .map_err(|e| Error::Internal(format!("lock poisoned: {e}")))?;

        Ok(guard
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut guard = self
            .objects
            .lock()
            .map_err(|e| Error::Internal(format!("lock poisoned: {e}")))?;

        guard
            .remove(key)
            .ok_or_else(|| Error::NotFound(format!("object {key} not found")))?;

        Ok(())
    }
}
