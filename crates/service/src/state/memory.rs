use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{scan_bounds, KeyValue, StateQueryIterator, StateStore, StoreError, VecStateIterator};

/// In-process state store. Contents are lost when the process exits.
#[derive(Default)]
pub struct MemoryStateStore {
    inner: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    #[cfg(test)]
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let map = self.inner.read().await;
        Ok(map.get(key).cloned())
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        let mut map = self.inner.write().await;
        map.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut map = self.inner.write().await;
        map.remove(key);
        Ok(())
    }

    async fn range_scan(
        &self,
        start_key: &str,
        end_key: &str,
    ) -> Result<Box<dyn StateQueryIterator>, StoreError> {
        let map = self.inner.read().await;
        let entries = match scan_bounds(start_key, end_key) {
            Some(bounds) => map
                .range::<str, _>(bounds)
                .map(|(k, v)| KeyValue { key: k.clone(), value: v.clone() })
                .collect(),
            None => Vec::new(),
        };
        Ok(Box::new(VecStateIterator::new(entries)))
    }
}
