// crates/quill-core/src/config.rs
//
// Static block configuration and the per-invocation runtime context.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::QuillError;

/// Document-type tag selecting a persistence strategy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum DataType {
    /// Content-addressed credential store.
    Credential,
    /// DID-keyed identity document store.
    IdentityDocument,
    /// Id-keyed approval store.
    Approval,
    /// Create-credential submission to the policy's root consensus topic.
    Ledger,
}

impl DataType {
    /// Every supported tag, in declaration order.
    pub const ALL: [DataType; 4] = [
        DataType::Credential,
        DataType::IdentityDocument,
        DataType::Approval,
        DataType::Ledger,
    ];

    /// Wire tag for this variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Credential => "credential",
            DataType::IdentityDocument => "identity-document",
            DataType::Approval => "approval",
            DataType::Ledger => "ledger",
        }
    }

    /// Comma-separated list of every supported tag.
    pub fn allowed_tags() -> String {
        Self::ALL
            .iter()
            .map(DataType::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = QuillError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|data_type| data_type.as_str() == tag)
            .ok_or_else(|| {
                QuillError::InvalidConfig(format!(
                    "Option \"dataType\" must be one of {}",
                    Self::allowed_tags()
                ))
            })
    }
}

/// A static option override written into the document's option map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptionOverride {
    pub name: String,
    pub value: Value,
}

/// Read-only configuration of a document sender block.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlockConfig {
    /// Raw document-type tag. Kept as a string so unsupported tags survive
    /// loading and can be reported by validation. Missing is empty.
    #[serde(default)]
    pub data_type: String,
    /// Entity type label stamped onto the document as its `type`.
    #[serde(default)]
    pub entity_type: Option<String>,
    /// Clear the document identity so it persists as a new record.
    #[serde(default)]
    pub force_new: bool,
    /// Static option overrides.
    #[serde(default)]
    pub options: Vec<OptionOverride>,
}

impl BlockConfig {
    /// Parse the configured document-type tag.
    pub fn data_type(&self) -> Result<DataType, QuillError> {
        self.data_type.parse()
    }
}

/// Per-block runtime context threaded explicitly through every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeContext {
    pub policy_id: String,
    pub block_id: Uuid,
    pub block_type: String,
    /// Block tag, stamped onto documents.
    pub tag: Option<String>,
}

impl RuntimeContext {
    pub fn new(policy_id: impl Into<String>, block_type: impl Into<String>) -> Self {
        Self {
            policy_id: policy_id.into(),
            block_id: Uuid::now_v7(),
            block_type: block_type.into(),
            tag: None,
        }
    }

    pub fn with_block_id(mut self, block_id: Uuid) -> Self {
        self.block_id = block_id;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Logging span carrying the block coordinates.
    pub fn span(&self) -> tracing::Span {
        tracing::info_span!(
            "block",
            policy_id = %self.policy_id,
            block_type = %self.block_type,
            block_id = %self.block_id,
        )
    }

    /// Build an action error tagged with this block's coordinates.
    pub fn action_error(&self, message: impl Into<String>) -> QuillError {
        QuillError::Action {
            message: message.into(),
            block_type: self.block_type.clone(),
            block_id: self.block_id,
        }
    }
}
