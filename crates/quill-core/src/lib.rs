// crates/quill-core/src/lib.rs
//
// quill-core: Core types, traits, and crypto primitives for the Quill
// document finalization and ledger-submission router.
//
// This is the leaf crate that all other crates in the workspace depend on.
// It defines the workflow document and persisted record shapes, the block
// configuration, the error type, the collaborator traits (stores, user
// directory, key store, topic registry), and the canonical credential codec.

pub mod config;
pub mod credential;
pub mod crypto;
pub mod document;
pub mod error;
pub mod identity;
pub mod records;
pub mod topic;
pub mod traits;
pub mod validation;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use quill_core::WorkflowDocument;`

// Document types
pub use document::{BlockState, DocumentSignature, DocumentStatus, WorkflowDocument};

// Persisted record types
pub use records::{
    ApprovalRecord, CredentialDraft, CredentialRecord, IdentityRecord, PersistedDocument,
    StoredRecord,
};

// Configuration types
pub use config::{BlockConfig, DataType, OptionOverride, RuntimeContext};

// Identity types
pub use identity::{AuthUser, KeyKind, SigningIdentity, UserAccount};

// Topic types
pub use topic::{TopicRecord, TopicType};

// Credential codec
pub use credential::{Credential, CredentialCodec, JcsCredentialCodec};

// Validation collector
pub use validation::{BlockValidationError, ValidationResults};

// Error type
pub use error::QuillError;

// Traits
pub use traits::{ExecutionRuntime, KeyStore, RecordStore, TopicRegistry, UserDirectory};
