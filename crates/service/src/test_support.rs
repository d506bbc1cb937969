#![cfg(test)]
use async_trait::async_trait;

use crate::state::{MemoryStateStore, StateQueryIterator, StateStore, StoreError};

/// Which capability a [`FailingStateStore`] rejects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailOn {
    Get,
    Put,
    Delete,
    Scan,
}

/// Memory-backed store that fails one capability with a backend error.
pub struct FailingStateStore {
    inner: MemoryStateStore,
    fail_on: FailOn,
}

impl FailingStateStore {
    pub fn new(fail_on: FailOn) -> Self {
        Self { inner: MemoryStateStore::new(), fail_on }
    }

    fn check(&self, op: FailOn) -> Result<(), StoreError> {
        if self.fail_on == op {
            return Err(StoreError::Backend(format!("injected {op:?} failure")));
        }
        Ok(())
    }
}

#[async_trait]
impl StateStore for FailingStateStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.check(FailOn::Get)?;
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.check(FailOn::Put)?;
        self.inner.put(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.check(FailOn::Delete)?;
        self.inner.delete(key).await
    }

    async fn range_scan(
        &self,
        start_key: &str,
        end_key: &str,
    ) -> Result<Box<dyn StateQueryIterator>, StoreError> {
        self.check(FailOn::Scan)?;
        self.inner.range_scan(start_key, end_key).await
    }
}
