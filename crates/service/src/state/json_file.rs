use std::{ops::Bound, path::PathBuf, sync::Arc};

use async_trait::async_trait;

use super::{scan_bounds, KeyValue, StateQueryIterator, StateStore, StoreError, VecStateIterator};
use crate::storage::json_map_store::JsonMapStore;

/// File-backed state store.
/// Keeps a map of `key -> bytes` persisted as JSON, so state survives host restarts.
#[derive(Clone)]
pub struct JsonFileStateStore {
    store: Arc<JsonMapStore<String, Vec<u8>>>,
}

impl JsonFileStateStore {
    /// Initialize the store from the given file path. Creates the file if missing.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Self, StoreError> {
        let store = JsonMapStore::<String, Vec<u8>>::new(path).await?;
        Ok(Self { store })
    }
}

fn owned(bound: Bound<&str>) -> Bound<String> {
    match bound {
        Bound::Included(k) => Bound::Included(k.to_string()),
        Bound::Excluded(k) => Bound::Excluded(k.to_string()),
        Bound::Unbounded => Bound::Unbounded,
    }
}

#[async_trait]
impl StateStore for JsonFileStateStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.store.get(&key.to_string()).await)
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.store.insert(key.to_string(), value).await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.store.remove(&key.to_string()).await.map(|_| ())
    }

    async fn range_scan(
        &self,
        start_key: &str,
        end_key: &str,
    ) -> Result<Box<dyn StateQueryIterator>, StoreError> {
        let entries = match scan_bounds(start_key, end_key) {
            Some((lo, hi)) => self
                .store
                .range((owned(lo), owned(hi)))
                .await
                .into_iter()
                .map(|(key, value)| KeyValue { key, value })
                .collect(),
            None => Vec::new(),
        };
        Ok(Box::new(VecStateIterator::new(entries)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{contract::RegistryContract, errors::ServiceError};
    use models::{Record, RecordKind};
    use uuid::Uuid;

    #[tokio::test]
    async fn file_state_survives_reopen() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("ekyc_state_{}.json", Uuid::new_v4()));
        let store = JsonFileStateStore::new(&tmp).await?;

        store.put("2", br#"{"ID":"2"}"#.to_vec()).await?;
        store.put("1", br#"{"ID":"1"}"#.to_vec()).await?;
        store.put("9", b"raw".to_vec()).await?;
        store.delete("9").await?;

        // reload store from disk to ensure persistence
        let reopened = JsonFileStateStore::new(&tmp).await?;
        assert_eq!(reopened.get("1").await?, Some(br#"{"ID":"1"}"#.to_vec()));
        assert!(reopened.get("9").await?.is_none());

        let mut it = reopened.range_scan("", "").await?;
        let mut keys = Vec::new();
        while let Some(kv) = it.next().await? {
            keys.push(kv.key);
        }
        assert_eq!(keys, ["1", "2"]);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn unwritable_file_rejects_create_without_phantom_record() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("ekyc_state_ro_{}.json", Uuid::new_v4()));
        let store = JsonFileStateStore::new(&tmp).await?;
        tokio::fs::remove_file(&tmp).await?;
        tokio::fs::create_dir(&tmp).await?;

        let contract = RegistryContract::new(RecordKind::Asset);
        let record = Record::new("42", "Alice", "F", 999, 1111, "BankX");
        let err = contract.create_record(&store, record).await.unwrap_err();
        assert!(matches!(err, ServiceError::Store(_)));
        assert!(!contract.record_exists(&store, "42").await?);

        let _ = tokio::fs::remove_dir(&tmp).await;
        Ok(())
    }
}
