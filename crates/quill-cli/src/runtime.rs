// crates/quill-cli/src/runtime.rs
//
// Standalone execution runtime for the CLI. There is no downstream block
// graph when the router runs on its own, so continuation is logged.

use async_trait::async_trait;

use quill_core::document::BlockState;
use quill_core::error::QuillError;
use quill_core::identity::AuthUser;
use quill_core::traits::ExecutionRuntime;

#[derive(Debug, Default)]
pub struct LoggingRuntime;

#[async_trait]
impl ExecutionRuntime for LoggingRuntime {
    async fn run_next(&self, user: &AuthUser, state: &BlockState) -> Result<(), QuillError> {
        tracing::info!(
            "Document {:?} finalized for {} (status {:?}); no next block",
            state.data.id,
            user.id,
            state.data.status
        );
        Ok(())
    }

    async fn update_block(&self, _state: &BlockState, user: &AuthUser) -> Result<(), QuillError> {
        tracing::debug!("Block state updated for {}", user.id);
        Ok(())
    }
}
