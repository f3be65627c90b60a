// crates/quill-store/src/directory.rs
//
// In-memory user directory, key store, and topic registry. Seeded from
// configuration by the CLI and used directly by tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use quill_core::error::QuillError;
use quill_core::identity::{KeyKind, UserAccount};
use quill_core::topic::{TopicRecord, TopicType};
use quill_core::traits::{KeyStore, TopicRegistry, UserDirectory};

/// User accounts indexed by user id.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<String, UserAccount>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, account: UserAccount) {
        self.users.write().await.insert(account.id.clone(), account);
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn get_user_by_id(&self, user_id: &str) -> Result<UserAccount, QuillError> {
        self.users
            .read()
            .await
            .get(user_id)
            .cloned()
            .ok_or_else(|| QuillError::NotFound(format!("user {}", user_id)))
    }
}

/// Stored key entry; only released to callers presenting the same token.
#[derive(Debug, Clone)]
struct KeyEntry {
    session_token: String,
    private_key: String,
}

/// Private keys indexed by (kind, did).
#[derive(Debug, Default)]
pub struct InMemoryKeyStore {
    keys: RwLock<HashMap<(KeyKind, String), KeyEntry>>,
}

impl InMemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(
        &self,
        session_token: impl Into<String>,
        kind: KeyKind,
        did: impl Into<String>,
        private_key: impl Into<String>,
    ) {
        self.keys.write().await.insert(
            (kind, did.into()),
            KeyEntry {
                session_token: session_token.into(),
                private_key: private_key.into(),
            },
        );
    }
}

#[async_trait]
impl KeyStore for InMemoryKeyStore {
    async fn get_key(
        &self,
        session_token: &str,
        kind: KeyKind,
        did: &str,
    ) -> Result<String, QuillError> {
        let keys = self.keys.read().await;
        match keys.get(&(kind, did.to_string())) {
            Some(entry) if entry.session_token == session_token => Ok(entry.private_key.clone()),
            // A wrong token looks the same as a missing key.
            _ => Err(QuillError::NotFound(format!("{:?} key for {}", kind, did))),
        }
    }
}

/// Topics indexed by (policy id, topic type).
#[derive(Debug, Default)]
pub struct InMemoryTopicRegistry {
    topics: RwLock<HashMap<(String, TopicType), TopicRecord>>,
}

impl InMemoryTopicRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, topic: TopicRecord) {
        self.topics
            .write()
            .await
            .insert((topic.policy_id.clone(), topic.topic_type), topic);
    }
}

#[async_trait]
impl TopicRegistry for InMemoryTopicRegistry {
    async fn find_one(
        &self,
        policy_id: &str,
        topic_type: TopicType,
    ) -> Result<Option<TopicRecord>, QuillError> {
        Ok(self
            .topics
            .read()
            .await
            .get(&(policy_id.to_string(), topic_type))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_key_store_requires_matching_token() {
        let keys = InMemoryKeyStore::new();
        keys.insert("token-1", KeyKind::Ledger, "did:quill:alice", "aa")
            .await;

        assert_eq!(
            keys.get_key("token-1", KeyKind::Ledger, "did:quill:alice")
                .await
                .unwrap(),
            "aa"
        );
        assert!(matches!(
            keys.get_key("token-2", KeyKind::Ledger, "did:quill:alice").await,
            Err(QuillError::NotFound(_))
        ));
        assert!(keys
            .get_key("token-1", KeyKind::Did, "did:quill:alice")
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_topic_lookup_by_policy_and_type() {
        let topics = InMemoryTopicRegistry::new();
        topics
            .insert(TopicRecord {
                policy_id: "p-1".to_string(),
                topic_type: TopicType::RootPolicyTopic,
                topic_id: "0.0.5005".to_string(),
                submission_key: None,
            })
            .await;

        let found = topics
            .find_one("p-1", TopicType::RootPolicyTopic)
            .await
            .unwrap();
        assert_eq!(found.unwrap().topic_id, "0.0.5005");
        assert!(topics
            .find_one("p-1", TopicType::UserTopic)
            .await
            .unwrap()
            .is_none());
        assert!(topics
            .find_one("p-2", TopicType::RootPolicyTopic)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let users = InMemoryUserDirectory::new();
        assert!(matches!(
            users.get_user_by_id("ghost").await,
            Err(QuillError::NotFound(_))
        ));
    }
}
