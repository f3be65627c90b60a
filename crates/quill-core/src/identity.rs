// crates/quill-core/src/identity.rs

use std::fmt;

use serde::{Deserialize, Serialize};

/// The user acting on a workflow step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub did: Option<String>,
}

impl AuthUser {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            did: None,
        }
    }
}

/// Account details the user directory holds for a document owner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserAccount {
    pub id: String,
    /// Ledger account paying for submissions (e.g., "0.0.1001").
    pub ledger_account_id: String,
    /// DID of the owner (e.g., "did:quill:0xabc...").
    pub did: String,
    /// Session token scoping key store access.
    pub session_token: String,
}

/// Kind of key held in the key store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum KeyKind {
    /// Ledger account key; signs consensus messages.
    Ledger,
    /// DID document key; signs credentials.
    Did,
}

/// Signing material resolved for one ledger submission.
///
/// Only lives for the duration of a single submission.
#[derive(Clone)]
pub struct SigningIdentity {
    pub ledger_account_id: String,
    pub did: String,
    /// Hex-encoded ed25519 secret key (32 bytes).
    pub private_key: String,
}

impl fmt::Debug for SigningIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningIdentity")
            .field("ledger_account_id", &self.ledger_account_id)
            .field("did", &self.did)
            .field("private_key", &"<redacted>")
            .finish()
    }
}
