// crates/quill-core/src/error.rs

use thiserror::Error;
use uuid::Uuid;

/// Workspace-wide error type for the Quill router.
#[derive(Debug, Error)]
pub enum QuillError {
    /// Storage layer error (RocksDB, in-memory store).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Cryptographic error (key parsing, signing, verification).
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Credential canonicalization error.
    #[error("Codec error: {0}")]
    Codec(String),

    /// Ledger message construction or submission error.
    #[error("Ledger error: {0}")]
    Ledger(String),

    /// Network transport error.
    #[error("Network error: {0}")]
    Network(String),

    /// Resource not found (user, key, topic).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Static block configuration is invalid.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// A block failed while running its action.
    #[error("{message} (block {block_type} {block_id})")]
    Action {
        message: String,
        block_type: String,
        block_id: Uuid,
    },
}

impl From<serde_json::Error> for QuillError {
    fn from(e: serde_json::Error) -> Self {
        QuillError::Serialization(e.to_string())
    }
}

impl From<ed25519_dalek::SignatureError> for QuillError {
    fn from(e: ed25519_dalek::SignatureError) -> Self {
        QuillError::Crypto(e.to_string())
    }
}

impl From<hex::FromHexError> for QuillError {
    fn from(e: hex::FromHexError) -> Self {
        QuillError::Crypto(format!("Invalid hex: {}", e))
    }
}
