// crates/quill-router/src/router.rs
//
// Dispatch from a document-type tag to its persistence strategy.
//
// The tag string is parsed into the closed `DataType` enum, and the table
// holds exactly one strategy per variant, so adding a variant without a
// strategy does not compile.

use async_trait::async_trait;

use quill_core::config::{BlockConfig, DataType, RuntimeContext};
use quill_core::document::WorkflowDocument;
use quill_core::error::QuillError;
use quill_core::records::PersistedDocument;

/// One way of persisting a preprocessed document.
#[async_trait]
pub trait PersistenceStrategy: Send + Sync {
    /// Persist the document and return what was stored.
    ///
    /// May update the document in place (the ledger strategy sets its status).
    async fn persist(
        &self,
        document: &mut WorkflowDocument,
        ctx: &RuntimeContext,
    ) -> Result<PersistedDocument, QuillError>;
}

/// One strategy per document type.
pub struct StrategyTable {
    pub credential: Box<dyn PersistenceStrategy>,
    pub identity_document: Box<dyn PersistenceStrategy>,
    pub approval: Box<dyn PersistenceStrategy>,
    pub ledger: Box<dyn PersistenceStrategy>,
}

impl StrategyTable {
    pub fn get(&self, data_type: DataType) -> &dyn PersistenceStrategy {
        match data_type {
            DataType::Credential => self.credential.as_ref(),
            DataType::IdentityDocument => self.identity_document.as_ref(),
            DataType::Approval => self.approval.as_ref(),
            DataType::Ledger => self.ledger.as_ref(),
        }
    }
}

/// Routes documents to the strategy named by the block's configured tag.
pub struct PersistenceRouter {
    table: StrategyTable,
}

impl PersistenceRouter {
    pub fn new(table: StrategyTable) -> Self {
        Self { table }
    }

    /// Persist a document with the configured strategy.
    ///
    /// An unsupported tag fails with an action error naming the tag and the
    /// block; nothing is persisted.
    pub async fn dispatch(
        &self,
        config: &BlockConfig,
        document: &mut WorkflowDocument,
        ctx: &RuntimeContext,
    ) -> Result<PersistedDocument, QuillError> {
        let data_type = config.data_type().map_err(|_| {
            ctx.action_error(format!("dataType \"{}\" is unknown", config.data_type))
        })?;

        tracing::debug!("Persisting document as {}", data_type);
        self.table.get(data_type).persist(document, ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Strategy that counts calls and echoes the document back.
    struct Echo(Arc<AtomicUsize>);

    #[async_trait]
    impl PersistenceStrategy for Echo {
        async fn persist(
            &self,
            document: &mut WorkflowDocument,
            _ctx: &RuntimeContext,
        ) -> Result<PersistedDocument, QuillError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(PersistedDocument::Ledger(document.clone()))
        }
    }

    fn router() -> (PersistenceRouter, [Arc<AtomicUsize>; 4]) {
        let counters = [
            Arc::new(AtomicUsize::new(0)),
            Arc::new(AtomicUsize::new(0)),
            Arc::new(AtomicUsize::new(0)),
            Arc::new(AtomicUsize::new(0)),
        ];
        let table = StrategyTable {
            credential: Box::new(Echo(counters[0].clone())),
            identity_document: Box::new(Echo(counters[1].clone())),
            approval: Box::new(Echo(counters[2].clone())),
            ledger: Box::new(Echo(counters[3].clone())),
        };
        (PersistenceRouter::new(table), counters)
    }

    fn config(tag: &str) -> BlockConfig {
        BlockConfig {
            data_type: tag.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_each_tag_reaches_its_strategy() {
        let (router, counters) = router();
        let ctx = RuntimeContext::new("p-1", "documentSenderBlock");

        for (index, data_type) in DataType::ALL.iter().enumerate() {
            let mut document = WorkflowDocument::default();
            router
                .dispatch(&config(data_type.as_str()), &mut document, &ctx)
                .await
                .unwrap();
            assert_eq!(counters[index].load(Ordering::SeqCst), 1);
        }
    }

    #[tokio::test]
    async fn test_unknown_tag_is_action_error() {
        let (router, counters) = router();
        let ctx = RuntimeContext::new("p-1", "documentSenderBlock");
        let mut document = WorkflowDocument::default();

        let err = router
            .dispatch(&config("hedera"), &mut document, &ctx)
            .await
            .unwrap_err();

        match err {
            QuillError::Action {
                message,
                block_type,
                block_id,
            } => {
                assert!(message.contains("\"hedera\""));
                assert_eq!(block_type, "documentSenderBlock");
                assert_eq!(block_id, ctx.block_id);
            }
            other => panic!("expected action error, got {:?}", other),
        }
        assert!(counters.iter().all(|c| c.load(Ordering::SeqCst) == 0));
    }
}
