//! Key-value capability surface handed to the contract on every call.
//!
//! A ledger runtime supplies an implementation; this crate only ships local
//! backends (`memory`, `json_file`) for hosts and tests. Keys are strings and
//! values are opaque bytes. Range scans use an inclusive start key and an
//! exclusive end key, and an empty bound means "unbounded on that side".

use std::ops::Bound;

use async_trait::async_trait;
use thiserror::Error;

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStateStore;
pub use memory::MemoryStateStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("state backend error: {0}")]
    Backend(String),
}

/// One `(key, value)` pair yielded by a range scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: Vec<u8>,
}

#[async_trait]
pub trait StateStore: Send + Sync {
    /// Stored bytes for `key`, or `None` when the key was never written or was deleted.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
    async fn range_scan(
        &self,
        start_key: &str,
        end_key: &str,
    ) -> Result<Box<dyn StateQueryIterator>, StoreError>;
}

/// Pull-based cursor over a range scan. Returns `Ok(None)` once exhausted.
#[async_trait]
pub trait StateQueryIterator: Send {
    async fn next(&mut self) -> Result<Option<KeyValue>, StoreError>;
}

/// Iterator over entries already collected from a backend.
pub struct VecStateIterator {
    entries: std::vec::IntoIter<KeyValue>,
}

impl VecStateIterator {
    pub fn new(entries: Vec<KeyValue>) -> Self {
        Self { entries: entries.into_iter() }
    }
}

#[async_trait]
impl StateQueryIterator for VecStateIterator {
    async fn next(&mut self) -> Result<Option<KeyValue>, StoreError> {
        Ok(self.entries.next())
    }
}

/// Map scan bounds onto `BTreeMap::range` bounds.
///
/// Returns `None` for an empty window (`start >= end` with both set), which
/// `BTreeMap::range` would otherwise reject.
pub(crate) fn scan_bounds<'a>(
    start_key: &'a str,
    end_key: &'a str,
) -> Option<(Bound<&'a str>, Bound<&'a str>)> {
    if !start_key.is_empty() && !end_key.is_empty() && start_key >= end_key {
        return None;
    }
    let lo = if start_key.is_empty() { Bound::Unbounded } else { Bound::Included(start_key) };
    let hi = if end_key.is_empty() { Bound::Unbounded } else { Bound::Excluded(end_key) };
    Some((lo, hi))
}
