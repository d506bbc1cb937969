use models::{errors::ModelError, RecordKind};
use thiserror::Error;

use crate::state::StoreError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{}", not_found_message(.kind, .id))]
    NotFound { kind: RecordKind, id: String },
    #[error("store failure: {0}")]
    Store(#[from] StoreError),
    #[error("model error: {0}")]
    Model(#[from] ModelError),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("unknown function: {0}")]
    UnknownFunction(String),
}

impl ServiceError {
    pub fn not_found(kind: RecordKind, id: &str) -> Self {
        Self::NotFound { kind, id: id.to_string() }
    }
}

fn not_found_message(kind: &RecordKind, id: &str) -> String {
    kind.not_found_message(id)
}
