//! Record data model shared by the contract and its hosts.
//! - `record`: the stored entity and its kind label.
//! - `seed`: the fixed records written by ledger initialization.
//! - `query`: entries returned by full scans.

pub mod errors;
pub mod query;
pub mod record;
pub mod seed;

pub use query::KeyedRecord;
pub use record::{Record, RecordKind};
