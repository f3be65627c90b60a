// crates/quill-router/src/strategies.rs
//
// Store-backed persistence strategies. Each store has its own natural key,
// so each strategy looks up by that key and either merges into the existing
// row or creates a new one:
//
//   - credentials: content hash of the canonical credential
//   - identity documents: DID
//   - approvals: record id
//
// The content hash is not scoped by policy or owner: two submissions with
// identical canonical content update the same credential record.

use std::sync::Arc;

use async_trait::async_trait;

use quill_core::config::RuntimeContext;
use quill_core::credential::CredentialCodec;
use quill_core::document::WorkflowDocument;
use quill_core::error::QuillError;
use quill_core::records::{
    ApprovalRecord, CredentialDraft, CredentialRecord, IdentityRecord, PersistedDocument,
};
use quill_core::traits::RecordStore;

use crate::router::PersistenceStrategy;

/// Upsert into the credential store by content hash.
pub struct CredentialStrategy {
    store: Arc<dyn RecordStore<CredentialRecord>>,
    codec: Arc<dyn CredentialCodec>,
}

impl CredentialStrategy {
    pub fn new(
        store: Arc<dyn RecordStore<CredentialRecord>>,
        codec: Arc<dyn CredentialCodec>,
    ) -> Self {
        Self { store, codec }
    }

    /// Canonicalize the payload and collect the fields to write.
    fn draft(&self, document: &WorkflowDocument) -> Result<CredentialDraft, QuillError> {
        let credential = self.codec.from_tree(&document.document)?;
        Ok(CredentialDraft {
            hash: credential.content_hash().to_string(),
            owner: document.owner.clone(),
            assignee: document.assignee.clone(),
            option: document.option.clone(),
            schema: document.schema.clone(),
            status: document.status.unwrap_or_default(),
            signature: document.signature.unwrap_or_default(),
            entity_type: document.entity_type.clone(),
            policy_id: document.policy_id.clone(),
            tag: document.tag.clone(),
            document: credential.to_tree(),
        })
    }
}

#[async_trait]
impl PersistenceStrategy for CredentialStrategy {
    async fn persist(
        &self,
        document: &mut WorkflowDocument,
        _ctx: &RuntimeContext,
    ) -> Result<PersistedDocument, QuillError> {
        let draft = self.draft(document)?;

        let record = match self.store.find_one(&draft.hash).await? {
            Some(mut existing) => {
                tracing::debug!("Updating credential {} ({})", existing.id, existing.hash);
                existing.merge(draft);
                existing
            }
            None => CredentialRecord::create(draft),
        };

        let saved = self.store.save(record).await?;
        Ok(PersistedDocument::Credential(saved))
    }
}

/// Upsert into the identity store by DID.
pub struct IdentityStrategy {
    store: Arc<dyn RecordStore<IdentityRecord>>,
}

impl IdentityStrategy {
    pub fn new(store: Arc<dyn RecordStore<IdentityRecord>>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PersistenceStrategy for IdentityStrategy {
    async fn persist(
        &self,
        document: &mut WorkflowDocument,
        _ctx: &RuntimeContext,
    ) -> Result<PersistedDocument, QuillError> {
        let existing = match &document.did {
            Some(did) => self.store.find_one(did).await?,
            None => None,
        };

        let record = match existing {
            Some(mut record) => {
                record.document = document.document.clone();
                record.status = document.status;
                record
            }
            None => IdentityRecord::create(document),
        };

        let saved = self.store.save(record).await?;
        Ok(PersistedDocument::Identity(saved))
    }
}

/// Upsert into the approval store by record id.
pub struct ApprovalStrategy {
    store: Arc<dyn RecordStore<ApprovalRecord>>,
}

impl ApprovalStrategy {
    pub fn new(store: Arc<dyn RecordStore<ApprovalRecord>>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PersistenceStrategy for ApprovalStrategy {
    async fn persist(
        &self,
        document: &mut WorkflowDocument,
        _ctx: &RuntimeContext,
    ) -> Result<PersistedDocument, QuillError> {
        let existing = match document.id {
            Some(id) => self.store.find_one(&id.to_string()).await?,
            None => None,
        };

        let record = match existing {
            Some(mut record) => {
                record.merge(document);
                record
            }
            None => ApprovalRecord::create(document),
        };

        let saved = self.store.save(record).await?;
        Ok(PersistedDocument::Approval(saved))
    }
}
