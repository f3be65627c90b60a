// crates/quill-router/src/ledger.rs
//
// Ledger submission: anchor a credential on the policy's root consensus
// topic.
//
// Steps, each awaited before the next:
//   1. Resolve the owner's account (ledger account id + DID)
//   2. Fetch the owner's ledger key from the key store
//   3. Find the policy's root topic
//   4. Canonicalize the credential payload
//   5. Build a create-credential message
//   6. Open a channel for the owner and apply the topic's submission key
//   7. Submit and wait for the receipt
//   8. Mark the document as issued
//
// Delivery is at most once per call: nothing here retries, and a failed
// submission leaves the document status as it was. Concurrent calls for the
// same owner are submitted concurrently; ordering per payer is up to the
// transport.

use std::sync::Arc;

use async_trait::async_trait;

use quill_core::config::RuntimeContext;
use quill_core::credential::CredentialCodec;
use quill_core::document::{DocumentStatus, WorkflowDocument};
use quill_core::error::QuillError;
use quill_core::identity::{KeyKind, SigningIdentity};
use quill_core::records::PersistedDocument;
use quill_core::topic::{TopicRecord, TopicType};
use quill_core::traits::{KeyStore, TopicRegistry, UserDirectory};
use quill_ledger::{LedgerMessage, LedgerTransport, MessageChannel, SubmissionReceipt};

use crate::router::PersistenceStrategy;

/// Submits create-credential messages on behalf of document owners.
pub struct LedgerSubmission {
    users: Arc<dyn UserDirectory>,
    keys: Arc<dyn KeyStore>,
    topics: Arc<dyn TopicRegistry>,
    codec: Arc<dyn CredentialCodec>,
    transport: Arc<dyn LedgerTransport>,
}

impl LedgerSubmission {
    pub fn new(
        users: Arc<dyn UserDirectory>,
        keys: Arc<dyn KeyStore>,
        topics: Arc<dyn TopicRegistry>,
        codec: Arc<dyn CredentialCodec>,
        transport: Arc<dyn LedgerTransport>,
    ) -> Self {
        Self {
            users,
            keys,
            topics,
            codec,
            transport,
        }
    }

    /// Resolve the owner's account and ledger key.
    async fn signing_identity(&self, owner: &str) -> Result<SigningIdentity, QuillError> {
        let user = self.users.get_user_by_id(owner).await?;
        let private_key = self
            .keys
            .get_key(&user.session_token, KeyKind::Ledger, &user.did)
            .await?;

        Ok(SigningIdentity {
            ledger_account_id: user.ledger_account_id,
            did: user.did,
            private_key,
        })
    }

    async fn root_topic(&self, policy_id: &str) -> Result<TopicRecord, QuillError> {
        self.topics
            .find_one(policy_id, TopicType::RootPolicyTopic)
            .await?
            .ok_or_else(|| QuillError::NotFound(format!("root policy topic for {}", policy_id)))
    }

    /// Submit the document's credential and mark the document as issued.
    pub async fn submit(
        &self,
        document: &mut WorkflowDocument,
        ctx: &RuntimeContext,
    ) -> Result<SubmissionReceipt, QuillError> {
        let owner = document
            .owner
            .as_deref()
            .ok_or_else(|| QuillError::NotFound("document owner".to_string()))?;

        let identity = self.signing_identity(owner).await?;
        let topic = self.root_topic(&ctx.policy_id).await?;

        let credential = self.codec.from_tree(&document.document)?;
        let message = LedgerMessage::create_credential(&credential);

        let mut channel = MessageChannel::new(&identity, self.transport.clone())?;
        if let Some(submission_key) = &topic.submission_key {
            channel.set_submission_key(submission_key)?;
        }

        let receipt = channel.send(&topic.topic_id, &message).await?;
        tracing::info!(
            "Credential {} issued to topic {} by {}",
            message.hash,
            topic.topic_id,
            identity.did
        );

        document.status = Some(DocumentStatus::Issued);
        Ok(receipt)
    }
}

#[async_trait]
impl PersistenceStrategy for LedgerSubmission {
    async fn persist(
        &self,
        document: &mut WorkflowDocument,
        ctx: &RuntimeContext,
    ) -> Result<PersistedDocument, QuillError> {
        self.submit(document, ctx).await?;
        Ok(PersistedDocument::Ledger(document.clone()))
    }
}
