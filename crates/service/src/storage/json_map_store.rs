use std::{collections::BTreeMap, path::PathBuf, sync::Arc};
use tokio::{fs, sync::RwLock};

use crate::state::StoreError;

/// Generic JSON file-backed ordered map.
///
/// Persists a `BTreeMap<K, V>` to a JSON file and rewrites the whole file after
/// every mutation. Intended for development hosts where a real ledger is overkill.
pub struct JsonMapStore<K, V> {
    inner: RwLock<BTreeMap<K, V>>,
    file_path: PathBuf,
}

impl<K, V> JsonMapStore<K, V>
where
    K: Ord + serde::Serialize + serde::de::DeserializeOwned + Clone,
    V: serde::Serialize + serde::de::DeserializeOwned + Clone,
{
    /// Initialize the store from a path. Creates the file with an empty map if missing.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, StoreError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let map: BTreeMap<K, V> = match fs::read(&file_path).await {
            Ok(bytes) if bytes.is_empty() => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                StoreError::Backend(format!("corrupt state file {}: {e}", file_path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let empty: BTreeMap<K, V> = BTreeMap::new();
                fs::write(&file_path, encode(&empty)?).await?;
                empty
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Arc::new(Self { inner: RwLock::new(map), file_path }))
    }

    async fn save(&self, map: &BTreeMap<K, V>) -> Result<(), StoreError> {
        fs::write(&self.file_path, encode(map)?).await?;
        Ok(())
    }

    /// Get value by key.
    pub async fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    /// Insert or overwrite a value and persist.
    /// If the file cannot be written the in-memory map is left as it was.
    pub async fn insert(&self, key: K, value: V) -> Result<(), StoreError> {
        let mut map = self.inner.write().await;
        let previous = map.insert(key.clone(), value);
        if let Err(e) = self.save(&map).await {
            match previous {
                Some(old) => map.insert(key, old),
                None => map.remove(&key),
            };
            return Err(e);
        }
        Ok(())
    }

    /// Remove a key and persist; returns whether it existed.
    /// If the file cannot be written the entry is restored.
    pub async fn remove(&self, key: &K) -> Result<bool, StoreError> {
        let mut map = self.inner.write().await;
        let Some(old) = map.remove(key) else {
            return Ok(false);
        };
        if let Err(e) = self.save(&map).await {
            map.insert(key.clone(), old);
            return Err(e);
        }
        Ok(true)
    }

    /// Entries whose keys fall inside `bounds`, in ascending key order.
    pub async fn range<R>(&self, bounds: R) -> Vec<(K, V)>
    where
        R: std::ops::RangeBounds<K>,
    {
        let map = self.inner.read().await;
        map.range(bounds).map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    #[cfg(test)]
    pub async fn list(&self) -> Vec<(K, V)> {
        self.range(..).await
    }
}

fn encode<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec(value).map_err(|e| StoreError::Backend(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn json_map_store_crud_persists() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("json_map_store_{}.json", uuid::Uuid::new_v4()));
        let store = JsonMapStore::<String, String>::new(&tmp).await?;

        // initially empty
        assert_eq!(store.list().await.len(), 0);

        store.insert("b".into(), "2".into()).await?;
        store.insert("a".into(), "1".into()).await?;
        assert_eq!(store.get(&"a".into()).await.as_deref(), Some("1"));

        // ordered listing
        let keys: Vec<_> = store.list().await.into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b"]);

        // remove and reload persistence
        assert!(store.remove(&"b".into()).await?);
        assert!(!store.remove(&"b".into()).await?);
        let reloaded = JsonMapStore::<String, String>::new(&tmp).await?;
        let entries = reloaded.list().await;
        assert_eq!(entries, vec![("a".to_string(), "1".to_string())]);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    /// Swap the state file for a directory so every later write fails.
    async fn break_file(path: &std::path::Path) -> Result<(), anyhow::Error> {
        tokio::fs::remove_file(path).await?;
        tokio::fs::create_dir(path).await?;
        Ok(())
    }

    #[tokio::test]
    async fn failed_save_leaves_map_unchanged() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("json_map_store_ro_{}.json", uuid::Uuid::new_v4()));
        let store = JsonMapStore::<String, String>::new(&tmp).await?;
        store.insert("kept".into(), "1".into()).await?;
        break_file(&tmp).await?;

        assert!(store.insert("new".into(), "2".into()).await.is_err());
        assert_eq!(store.get(&"new".into()).await, None);

        assert!(store.insert("kept".into(), "changed".into()).await.is_err());
        assert_eq!(store.get(&"kept".into()).await.as_deref(), Some("1"));

        assert!(store.remove(&"kept".into()).await.is_err());
        assert_eq!(store.get(&"kept".into()).await.as_deref(), Some("1"));
        assert_eq!(store.list().await.len(), 1);

        let _ = tokio::fs::remove_dir(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("json_map_store_bad_{}.json", uuid::Uuid::new_v4()));
        tokio::fs::write(&tmp, b"{not json").await?;
        let res = JsonMapStore::<String, String>::new(&tmp).await;
        assert!(matches!(res, Err(StoreError::Backend(_))));
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
