use thiserror::Error;

pub type Result<T> = std::result::Result<T, KnowledgeError>;

#[derive(Error, Debug)]
pub enum KnowledgeError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid record {id}: {reason}")]
    InvalidRecord { id: u32, reason: String },

    #[error("Duplicate record id: {0}")]
    DuplicateId(u32),

    #[error("Unknown category: {0}")]
    UnknownCategory(u32),

    #[error("Knowledge store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("{0}")]
    Other(String),
}
