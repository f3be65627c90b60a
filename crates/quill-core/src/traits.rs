// crates/quill-core/src/traits.rs

use async_trait::async_trait;

use crate::document::BlockState;
use crate::error::QuillError;
use crate::identity::{AuthUser, KeyKind, UserAccount};
use crate::records::StoredRecord;
use crate::topic::{TopicRecord, TopicType};

/// Persistent storage for one record kind.
///
/// Implemented by quill-store (in-memory and RocksDB backends).
#[async_trait]
pub trait RecordStore<R: StoredRecord>: Send + Sync {
    /// Look up a record by its natural key (see `StoredRecord::store_key`).
    async fn find_one(&self, key: &str) -> Result<Option<R>, QuillError>;

    /// Insert or replace a record under its natural key and return what was stored.
    async fn save(&self, record: R) -> Result<R, QuillError>;
}

/// Resolves account details for a user id.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn get_user_by_id(&self, user_id: &str) -> Result<UserAccount, QuillError>;
}

/// Holds users' private keys, scoped by session token.
#[async_trait]
pub trait KeyStore: Send + Sync {
    /// Return the hex-encoded private key of `kind` for `did`.
    async fn get_key(
        &self,
        session_token: &str,
        kind: KeyKind,
        did: &str,
    ) -> Result<String, QuillError>;
}

/// Lookup of ledger consensus topics.
#[async_trait]
pub trait TopicRegistry: Send + Sync {
    async fn find_one(
        &self,
        policy_id: &str,
        topic_type: TopicType,
    ) -> Result<Option<TopicRecord>, QuillError>;
}

/// The execution-graph runtime that invoked a block.
///
/// Called only after the block's persistence step has returned.
#[async_trait]
pub trait ExecutionRuntime: Send + Sync {
    /// Continue the execution graph with the next block.
    async fn run_next(&self, user: &AuthUser, state: &BlockState) -> Result<(), QuillError>;

    /// Broadcast the updated block state to subscribers.
    async fn update_block(&self, state: &BlockState, user: &AuthUser) -> Result<(), QuillError>;
}
