// crates/quill-core/src/document.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Ledger status of a document.
///
///   New --> Issued --> Revoked
///    |
///    v
///  Failed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum DocumentStatus {
    /// Not yet anchored on the ledger.
    #[default]
    #[serde(rename = "NEW")]
    New,
    /// A create-credential message was accepted by the consensus channel.
    #[serde(rename = "ISSUE")]
    Issued,
    /// Revoked after issuance.
    #[serde(rename = "REVOKE")]
    Revoked,
    /// Submission was attempted and rejected.
    #[serde(rename = "FAILED")]
    Failed,
}

/// Signature verification state of a document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum DocumentSignature {
    #[default]
    #[serde(rename = "NEW")]
    New,
    #[serde(rename = "VERIFIED")]
    Verified,
    #[serde(rename = "INVALID")]
    Invalid,
}

/// The document under processing, produced by an upstream workflow step.
///
/// Every field except the raw credential payload is optional: upstream steps
/// fill in only what they know, and the preprocessor stamps routing metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDocument {
    /// Record identity. Cleared when the block is configured with `forceNew`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub policy_id: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    /// Entity type label stamped from the block configuration.
    #[serde(default, rename = "type")]
    pub entity_type: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default, rename = "assign")]
    pub assignee: Option<String>,
    /// Free-form option map. Static overrides from the block config land here.
    #[serde(default)]
    pub option: Option<Map<String, Value>>,
    /// Schema reference (IRI or local id).
    #[serde(default)]
    pub schema: Option<String>,
    #[serde(default)]
    pub status: Option<DocumentStatus>,
    #[serde(default)]
    pub signature: Option<DocumentSignature>,
    /// Decentralized identifier; the natural key of identity documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub did: Option<String>,
    /// Raw credential payload (opaque nested JSON tree).
    #[serde(default)]
    pub document: Value,
}

/// Execution-graph state handed to a block's action.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BlockState {
    pub data: WorkflowDocument,
}

impl BlockState {
    pub fn new(data: WorkflowDocument) -> Self {
        Self { data }
    }
}
