//! Runtime environment helpers
//!
//! Builds the state backend a host hands to the contract, from the registry config.

use std::sync::Arc;

use configs::{RegistryConfig, StoreBackend};
use tracing::info;

use crate::state::{JsonFileStateStore, MemoryStateStore, StateStore};

/// Open the configured state store, creating the data directory for the file backend.
pub async fn open_state_store(cfg: &RegistryConfig) -> anyhow::Result<Arc<dyn StateStore>> {
    match cfg.store {
        StoreBackend::Memory => {
            info!(backend = "memory", "state store opened");
            Ok(Arc::new(MemoryStateStore::new()))
        }
        StoreBackend::File => {
            common::env::ensure_data_dir(&cfg.data_path).await?;
            let store = JsonFileStateStore::new(cfg.data_path.as_str()).await?;
            info!(backend = "file", path = %cfg.data_path, "state store opened");
            Ok(Arc::new(store))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn opens_each_backend() -> Result<(), anyhow::Error> {
        let mem = open_state_store(&RegistryConfig::default()).await?;
        mem.put("k", b"v".to_vec()).await?;
        assert_eq!(mem.get("k").await?, Some(b"v".to_vec()));

        let dir = std::env::temp_dir().join(format!("ekyc_runtime_{}", uuid::Uuid::new_v4()));
        let cfg = RegistryConfig {
            store: StoreBackend::File,
            data_path: dir.join("state.json").to_string_lossy().into_owned(),
            ..RegistryConfig::default()
        };
        let file = open_state_store(&cfg).await?;
        file.put("k", b"v".to_vec()).await?;
        assert!(tokio::fs::metadata(dir.join("state.json")).await.is_ok());

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }
}
