// crates/quill-ledger/src/message.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use quill_core::credential::{Credential, JcsCredentialCodec};
use quill_core::error::QuillError;

/// What a consensus message asks the network to record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MessageAction {
    CreateCredential,
}

/// Kind of document a message carries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MessageKind {
    VerifiableCredential,
}

/// A message destined for a consensus topic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerMessage {
    /// Client-side message id (UUID v7 for time-ordering).
    pub id: Uuid,
    pub action: MessageAction,
    pub kind: MessageKind,
    /// Content hash of the carried credential.
    pub hash: String,
    /// Canonical credential tree.
    pub payload: Value,
}

impl LedgerMessage {
    /// Build a create-credential message wrapping a canonical credential.
    pub fn create_credential(credential: &Credential) -> Self {
        Self {
            id: Uuid::now_v7(),
            action: MessageAction::CreateCredential,
            kind: MessageKind::VerifiableCredential,
            hash: credential.content_hash().to_string(),
            payload: credential.to_tree(),
        }
    }

    /// Canonical bytes that get signed and transmitted.
    pub fn to_bytes(&self) -> Result<Vec<u8>, QuillError> {
        let value = serde_json::to_value(self)?;
        JcsCredentialCodec::canonical_bytes(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::credential::CredentialCodec;
    use serde_json::json;

    #[test]
    fn test_create_credential_carries_hash_and_payload() {
        let credential = JcsCredentialCodec
            .from_tree(&json!({ "type": "VC", "issuer": "did:quill:a" }))
            .unwrap();
        let message = LedgerMessage::create_credential(&credential);

        assert_eq!(message.action, MessageAction::CreateCredential);
        assert_eq!(message.kind, MessageKind::VerifiableCredential);
        assert_eq!(message.hash, credential.content_hash());
        assert_eq!(message.payload, credential.to_tree());
    }

    #[test]
    fn test_to_bytes_is_stable() {
        let credential = JcsCredentialCodec.from_tree(&json!({ "type": "VC" })).unwrap();
        let message = LedgerMessage::create_credential(&credential);
        assert_eq!(message.to_bytes().unwrap(), message.to_bytes().unwrap());

        let text = String::from_utf8(message.to_bytes().unwrap()).unwrap();
        assert!(text.contains("\"action\":\"create-credential\""));
    }
}
