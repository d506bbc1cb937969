use std::sync::Arc;

use service::{RegistryContract, StateStore};

/// Shared handler state: the contract and the store handed to it on every invocation.
#[derive(Clone)]
pub struct AppState {
    pub contract: RegistryContract,
    pub store: Arc<dyn StateStore>,
}

impl AppState {
    pub fn new(contract: RegistryContract, store: Arc<dyn StateStore>) -> Self {
        Self { contract, store }
    }
}
