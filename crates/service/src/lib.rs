//! Registry contract over an injected key-value state store.
//! - `state` defines the capability surface a ledger runtime hands to each call.
//! - `contract` holds the record operations; `dispatch` maps named invocations onto them.
//! - `storage` and the `state` backends give local hosts something to run against.

pub mod errors;
pub mod state;
pub mod storage;
pub mod contract;
pub mod dispatch;
pub mod runtime;
#[cfg(test)]
pub mod test_support;

pub use contract::RegistryContract;
pub use dispatch::Function;
pub use errors::ServiceError;
pub use state::{KeyValue, StateQueryIterator, StateStore, StoreError};
