use models::{errors::ModelError, seed::seed_records, KeyedRecord, Record, RecordKind};
use tracing::{debug, info, instrument, warn};

use crate::errors::ServiceError;
use crate::state::StateStore;

/// Record registry executed against a caller-supplied state store.
///
/// One instance serves one [`RecordKind`]; the kind only affects the doc type
/// written by seeding, entry point names and error messages. The contract holds
/// no state of its own: every operation reads and writes through `ctx`, and
/// every store call is awaited before the operation returns.
#[derive(Clone, Copy, Debug)]
pub struct RegistryContract {
    kind: RecordKind,
}

impl RegistryContract {
    pub fn new(kind: RecordKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Write the five seed records, overwriting whatever is stored under their ids.
    #[instrument(skip(self, ctx), fields(kind = %self.kind))]
    pub async fn initialize_ledger(&self, ctx: &dyn StateStore) -> Result<(), ServiceError> {
        for record in seed_records(self.kind) {
            ctx.put(&record.id, record.to_json()?.into_bytes()).await?;
            info!(id = %record.id, "{} {} initialized", self.kind.label(), record.id);
        }
        Ok(())
    }

    /// Stored value for `id` as text, exactly as written.
    #[instrument(skip(self, ctx), fields(kind = %self.kind))]
    pub async fn read_record(&self, ctx: &dyn StateStore, id: &str) -> Result<String, ServiceError> {
        let bytes = self.fetch(ctx, id).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Store `record` under its id without checking for an existing entry.
    /// Returns the serialized record once the write has completed.
    #[instrument(skip(self, ctx, record), fields(kind = %self.kind, id = %record.id))]
    pub async fn create_record(
        &self,
        ctx: &dyn StateStore,
        record: Record,
    ) -> Result<String, ServiceError> {
        let json = record.to_json()?;
        ctx.put(&record.id, json.clone().into_bytes()).await?;
        debug!("record written");
        Ok(json)
    }

    /// Replace an existing record wholesale. Fields are not merged.
    #[instrument(skip(self, ctx, record), fields(kind = %self.kind, id = %record.id))]
    pub async fn update_record(&self, ctx: &dyn StateStore, record: Record) -> Result<(), ServiceError> {
        if !self.record_exists(ctx, &record.id).await? {
            return Err(ServiceError::not_found(self.kind, &record.id));
        }
        ctx.put(&record.id, record.to_json()?.into_bytes()).await?;
        Ok(())
    }

    #[instrument(skip(self, ctx), fields(kind = %self.kind))]
    pub async fn delete_record(&self, ctx: &dyn StateStore, id: &str) -> Result<(), ServiceError> {
        if !self.record_exists(ctx, id).await? {
            return Err(ServiceError::not_found(self.kind, id));
        }
        ctx.delete(id).await?;
        Ok(())
    }

    /// True iff a non-empty value is stored under `id`. Store failures are
    /// returned as errors rather than reported as absence.
    pub async fn record_exists(&self, ctx: &dyn StateStore, id: &str) -> Result<bool, ServiceError> {
        Ok(ctx.get(id).await?.is_some_and(|bytes| !bytes.is_empty()))
    }

    /// Set `Pan` on an existing record and write it back.
    ///
    /// The stored value is edited as a JSON object, so the doc type and any
    /// fields this contract does not model are kept.
    #[instrument(skip(self, ctx), fields(kind = %self.kind))]
    pub async fn transfer_record(
        &self,
        ctx: &dyn StateStore,
        id: &str,
        new_pan: u64,
    ) -> Result<(), ServiceError> {
        let bytes = self.fetch(ctx, id).await?;
        let mut value: serde_json::Value = serde_json::from_slice(&bytes)
            .map_err(|e| ModelError::Decode(format!("stored value for {id}: {e}")))?;
        let fields = value
            .as_object_mut()
            .ok_or_else(|| ModelError::Decode(format!("stored value for {id} is not a JSON object")))?;
        fields.insert("Pan".to_string(), new_pan.into());
        let encoded = serde_json::to_vec(&value).map_err(|e| ModelError::Encode(e.to_string()))?;
        ctx.put(id, encoded).await?;
        Ok(())
    }

    /// Every entry in the namespace as a JSON array of `{Key, Record}`.
    pub async fn get_all_records(&self, ctx: &dyn StateStore) -> Result<String, ServiceError> {
        let entries = self.scan_all(ctx).await?;
        serde_json::to_string(&entries).map_err(|e| ModelError::Encode(e.to_string()).into())
    }

    /// Full unbounded scan, materialized in store order.
    ///
    /// Values that are not valid JSON are returned as raw text instead of
    /// failing the scan. Nothing bounds the result size here; that is left to
    /// the backing store.
    #[instrument(skip(self, ctx), fields(kind = %self.kind))]
    pub async fn scan_all(&self, ctx: &dyn StateStore) -> Result<Vec<KeyedRecord>, ServiceError> {
        let mut iter = ctx.range_scan("", "").await?;
        let mut all = Vec::new();
        while let Some(kv) = iter.next().await? {
            let (entry, parsed) = KeyedRecord::decode(kv.key, &kv.value);
            if !parsed {
                warn!(key = %entry.key, "stored value is not JSON, returning raw text");
            }
            all.push(entry);
        }
        debug!(count = all.len(), "scan complete");
        Ok(all)
    }

    async fn fetch(&self, ctx: &dyn StateStore, id: &str) -> Result<Vec<u8>, ServiceError> {
        match ctx.get(id).await? {
            Some(bytes) if !bytes.is_empty() => Ok(bytes),
            _ => Err(ServiceError::not_found(self.kind, id)),
        }
    }
}
