// crates/quill-router/src/block.rs
//
// DocumentSenderBlock: the entry point the execution-graph runtime calls.
//
// Constructed once per configured block with its collaborators passed in
// explicitly. Holds no state between invocations.

use std::sync::Arc;

use tracing::Instrument;

use quill_core::config::{BlockConfig, RuntimeContext};
use quill_core::credential::CredentialCodec;
use quill_core::document::BlockState;
use quill_core::error::QuillError;
use quill_core::identity::AuthUser;
use quill_core::records::{ApprovalRecord, CredentialRecord, IdentityRecord, PersistedDocument};
use quill_core::traits::{ExecutionRuntime, KeyStore, RecordStore, TopicRegistry, UserDirectory};
use quill_core::validation::ValidationResults;
use quill_ledger::LedgerTransport;

use crate::ledger::LedgerSubmission;
use crate::preprocess::preprocess;
use crate::router::{PersistenceRouter, StrategyTable};
use crate::strategies::{ApprovalStrategy, CredentialStrategy, IdentityStrategy};
use crate::validate::validate_config;

/// Block type reported in action errors and log spans.
pub const BLOCK_TYPE: &str = "documentSenderBlock";

/// External collaborators a document sender block needs.
#[derive(Clone)]
pub struct Collaborators {
    pub credentials: Arc<dyn RecordStore<CredentialRecord>>,
    pub identities: Arc<dyn RecordStore<IdentityRecord>>,
    pub approvals: Arc<dyn RecordStore<ApprovalRecord>>,
    pub users: Arc<dyn UserDirectory>,
    pub keys: Arc<dyn KeyStore>,
    pub topics: Arc<dyn TopicRegistry>,
    pub codec: Arc<dyn CredentialCodec>,
    pub transport: Arc<dyn LedgerTransport>,
}

impl Collaborators {
    /// Build the strategy table over these collaborators.
    pub fn strategy_table(&self) -> StrategyTable {
        StrategyTable {
            credential: Box::new(CredentialStrategy::new(
                self.credentials.clone(),
                self.codec.clone(),
            )),
            identity_document: Box::new(IdentityStrategy::new(self.identities.clone())),
            approval: Box::new(ApprovalStrategy::new(self.approvals.clone())),
            ledger: Box::new(LedgerSubmission::new(
                self.users.clone(),
                self.keys.clone(),
                self.topics.clone(),
                self.codec.clone(),
                self.transport.clone(),
            )),
        }
    }
}

/// Finalizes workflow documents into their store, or onto the ledger.
pub struct DocumentSenderBlock {
    config: BlockConfig,
    ctx: RuntimeContext,
    router: PersistenceRouter,
}

impl DocumentSenderBlock {
    pub fn new(config: BlockConfig, ctx: RuntimeContext, collaborators: &Collaborators) -> Self {
        Self {
            config,
            ctx,
            router: PersistenceRouter::new(collaborators.strategy_table()),
        }
    }

    pub fn config(&self) -> &BlockConfig {
        &self.config
    }

    pub fn context(&self) -> &RuntimeContext {
        &self.ctx
    }

    /// Preprocess `state.data` in place, then persist it.
    ///
    /// After a ledger submission `state.data` carries the issued status.
    pub async fn send_document(
        &self,
        state: &mut BlockState,
        user: &AuthUser,
    ) -> Result<PersistedDocument, QuillError> {
        tracing::debug!("Sending document for user {}", user.id);
        state.data = preprocess(&state.data, &self.config, &self.ctx);
        self.router
            .dispatch(&self.config, &mut state.data, &self.ctx)
            .await
    }

    /// Persist the document, then continue the execution graph.
    ///
    /// The runtime's `run_next` and `update_block` are only called once
    /// persistence has succeeded. Failures are logged with the block's
    /// coordinates and returned unchanged.
    pub async fn run_action(
        &self,
        state: &mut BlockState,
        user: &AuthUser,
        runtime: &dyn ExecutionRuntime,
    ) -> Result<PersistedDocument, QuillError> {
        let span = self.ctx.span();
        async move {
            tracing::info!("runAction");

            let result = match self.send_document(state, user).await {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!("Block action failed: {}", e);
                    return Err(e);
                }
            };

            runtime.run_next(user, state).await?;
            runtime.update_block(state, user).await?;
            Ok(result)
        }
        .instrument(span)
        .await
    }

    /// Static configuration check; never fails.
    pub fn validate(&self, results: &mut ValidationResults) {
        validate_config(&self.config, self.ctx.block_id, results);
    }
}
