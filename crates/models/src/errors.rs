use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("encode error: {0}")]
    Encode(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("unknown record kind: {0}")]
    UnknownKind(String),
}
