// crates/quill-core/src/topic.rs

use serde::{Deserialize, Serialize};

/// Role of a consensus topic within a policy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TopicType {
    /// The policy's anchor topic for credential-creation messages.
    RootPolicyTopic,
    PolicyTopic,
    UserTopic,
}

/// Descriptor of a ledger consensus channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopicRecord {
    pub policy_id: String,
    pub topic_type: TopicType,
    /// Ledger topic id (e.g., "0.0.5005").
    pub topic_id: String,
    /// Hex-encoded ed25519 key authorizing submissions. None for open topics.
    #[serde(default)]
    pub submission_key: Option<String>,
}
