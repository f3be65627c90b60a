// crates/quill-core/src/records.rs
//
// Persisted forms of a WorkflowDocument, one per store.
//
// Store keys:
//   - CredentialRecord: content hash of the canonical credential
//   - IdentityRecord:   decentralized identifier (falls back to the record id)
//   - ApprovalRecord:   record id
//
// Within a store the key is unique: saving a record whose key already
// exists replaces the stored row instead of adding a second one.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::document::{DocumentSignature, DocumentStatus, WorkflowDocument};

/// A record kind that can live in a `RecordStore`.
pub trait StoredRecord: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection name, used as a key prefix by shared backends.
    const COLLECTION: &'static str;

    /// Record identity.
    fn id(&self) -> Uuid;

    /// Natural key of this record within its store.
    fn store_key(&self) -> String;

    /// Refresh the modification timestamp before a write.
    fn touch(&mut self);
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// Field set written into a credential record on create or update.
#[derive(Debug, Clone, PartialEq)]
pub struct CredentialDraft {
    pub hash: String,
    pub owner: Option<String>,
    pub assignee: Option<String>,
    pub option: Option<Map<String, Value>>,
    pub schema: Option<String>,
    pub status: DocumentStatus,
    pub signature: DocumentSignature,
    pub entity_type: Option<String>,
    pub policy_id: Option<String>,
    pub tag: Option<String>,
    /// Canonical credential tree.
    pub document: Value,
}

/// A content-addressed credential record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    pub id: Uuid,
    /// Lowercase hex SHA-256 of the canonical credential.
    pub hash: String,
    pub owner: Option<String>,
    #[serde(rename = "assign")]
    pub assignee: Option<String>,
    pub option: Option<Map<String, Value>>,
    pub schema: Option<String>,
    /// Ledger status of the credential.
    pub status: DocumentStatus,
    pub signature: DocumentSignature,
    #[serde(rename = "type")]
    pub entity_type: Option<String>,
    pub policy_id: Option<String>,
    pub tag: Option<String>,
    pub document: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CredentialRecord {
    /// Create a brand-new record from a draft, assigning a fresh id.
    pub fn create(draft: CredentialDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            hash: draft.hash,
            owner: draft.owner,
            assignee: draft.assignee,
            option: draft.option,
            schema: draft.schema,
            status: draft.status,
            signature: draft.signature,
            entity_type: draft.entity_type,
            policy_id: draft.policy_id,
            tag: draft.tag,
            document: draft.document,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the mutable fields from a draft.
    ///
    /// Identity, hash, policy id, and creation time are kept.
    pub fn merge(&mut self, draft: CredentialDraft) {
        self.owner = draft.owner;
        self.assignee = draft.assignee;
        self.option = draft.option;
        self.schema = draft.schema;
        self.status = draft.status;
        self.signature = draft.signature;
        self.entity_type = draft.entity_type;
        self.tag = draft.tag;
        self.document = draft.document;
    }
}

impl StoredRecord for CredentialRecord {
    const COLLECTION: &'static str = "credential";

    fn id(&self) -> Uuid {
        self.id
    }

    fn store_key(&self) -> String {
        self.hash.clone()
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

// ---------------------------------------------------------------------------
// Identity documents
// ---------------------------------------------------------------------------

/// An identity document keyed by its decentralized identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IdentityRecord {
    pub id: Uuid,
    pub did: Option<String>,
    pub owner: Option<String>,
    pub policy_id: Option<String>,
    pub tag: Option<String>,
    #[serde(rename = "type")]
    pub entity_type: Option<String>,
    pub option: Option<Map<String, Value>>,
    pub status: Option<DocumentStatus>,
    pub document: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl IdentityRecord {
    /// Create a record from the full document. Keeps the document id if it has one.
    pub fn create(document: &WorkflowDocument) -> Self {
        let now = Utc::now();
        Self {
            id: document.id.unwrap_or_else(Uuid::now_v7),
            did: document.did.clone(),
            owner: document.owner.clone(),
            policy_id: document.policy_id.clone(),
            tag: document.tag.clone(),
            entity_type: document.entity_type.clone(),
            option: document.option.clone(),
            status: document.status,
            document: document.document.clone(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl StoredRecord for IdentityRecord {
    const COLLECTION: &'static str = "identity";

    fn id(&self) -> Uuid {
        self.id
    }

    fn store_key(&self) -> String {
        match &self.did {
            Some(did) => did.clone(),
            None => self.id.to_string(),
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

// ---------------------------------------------------------------------------
// Approvals
// ---------------------------------------------------------------------------

/// An approval document keyed by record identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalRecord {
    pub id: Uuid,
    pub owner: Option<String>,
    #[serde(rename = "assign")]
    pub assignee: Option<String>,
    pub option: Option<Map<String, Value>>,
    pub schema: Option<String>,
    pub policy_id: Option<String>,
    pub tag: Option<String>,
    #[serde(rename = "type")]
    pub entity_type: Option<String>,
    pub status: Option<DocumentStatus>,
    pub document: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ApprovalRecord {
    /// Create a record from the full document. Keeps the document id if it has one.
    pub fn create(document: &WorkflowDocument) -> Self {
        let now = Utc::now();
        Self {
            id: document.id.unwrap_or_else(Uuid::now_v7),
            owner: document.owner.clone(),
            assignee: document.assignee.clone(),
            option: document.option.clone(),
            schema: document.schema.clone(),
            policy_id: document.policy_id.clone(),
            tag: document.tag.clone(),
            entity_type: document.entity_type.clone(),
            status: document.status,
            document: document.document.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite owner, options, schema, payload, tag, and type from a document.
    pub fn merge(&mut self, document: &WorkflowDocument) {
        self.owner = document.owner.clone();
        self.option = document.option.clone();
        self.schema = document.schema.clone();
        self.document = document.document.clone();
        self.tag = document.tag.clone();
        self.entity_type = document.entity_type.clone();
    }
}

impl StoredRecord for ApprovalRecord {
    const COLLECTION: &'static str = "approval";

    fn id(&self) -> Uuid {
        self.id
    }

    fn store_key(&self) -> String {
        self.id.to_string()
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

// ---------------------------------------------------------------------------
// Dispatch result
// ---------------------------------------------------------------------------

/// The outcome of one persistence dispatch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "record", rename_all = "kebab-case")]
pub enum PersistedDocument {
    Credential(CredentialRecord),
    Identity(IdentityRecord),
    Approval(ApprovalRecord),
    /// The workflow document after a ledger submission.
    Ledger(WorkflowDocument),
}

impl PersistedDocument {
    /// Identity of the persisted record, if it has one.
    pub fn id(&self) -> Option<Uuid> {
        match self {
            PersistedDocument::Credential(r) => Some(r.id),
            PersistedDocument::Identity(r) => Some(r.id),
            PersistedDocument::Approval(r) => Some(r.id),
            PersistedDocument::Ledger(d) => d.id,
        }
    }

    /// Ledger status carried by the result.
    pub fn status(&self) -> Option<DocumentStatus> {
        match self {
            PersistedDocument::Credential(r) => Some(r.status),
            PersistedDocument::Identity(r) => r.status,
            PersistedDocument::Approval(r) => r.status,
            PersistedDocument::Ledger(d) => d.status,
        }
    }
}
