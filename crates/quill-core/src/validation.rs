// crates/quill-core/src/validation.rs
//
// Collector for static configuration errors. Validation passes append to it
// and never fail, so one bad block does not hide errors in its siblings.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One configuration error attributed to a block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockValidationError {
    pub block_id: Uuid,
    pub message: String,
}

/// Shared validation results for a policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationResults {
    errors: Vec<BlockValidationError>,
}

impl ValidationResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_block_error(&mut self, block_id: Uuid, message: impl Into<String>) {
        self.errors.push(BlockValidationError {
            block_id,
            message: message.into(),
        });
    }

    pub fn errors(&self) -> &[BlockValidationError] {
        &self.errors
    }

    /// Errors attributed to one block.
    pub fn errors_for(&self, block_id: Uuid) -> impl Iterator<Item = &BlockValidationError> {
        self.errors.iter().filter(move |e| e.block_id == block_id)
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}
