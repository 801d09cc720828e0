//! In-memory blob store implementation for testing.

use std::sync::{Arc, Mutex};

use crate::{BlobStore, StoreError, StoreResult};

/// An in-memory blob store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    data: Arc<Mutex<Option<Vec<u8>>>>,
}

impl MemoryStore {
    /// Creates a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn load(&self) -> StoreResult<Option<Vec<u8>>> {
        let data = self
            .data
            .lock()
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        Ok(data.clone())
    }

    fn save(&self, bytes: &[u8]) -> StoreResult<()> {
        let mut data = self
            .data
            .lock()
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        *data = Some(bytes.to_vec());
        Ok(())
    }

    fn delete(&self) -> StoreResult<()> {
        let mut data = self
            .data
            .lock()
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        *data = None;
        Ok(())
    }

    fn exists(&self) -> StoreResult<bool> {
        let data = self
            .data
            .lock()
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        Ok(data.is_some())
    }
}
