// crates/quill-router/src/preprocess.rs
//
// Document preprocessing: stamp routing metadata and apply static option
// overrides before persistence.

use quill_core::config::{BlockConfig, RuntimeContext};
use quill_core::document::WorkflowDocument;
use serde_json::Map;

/// Produce the document the persistence step will see.
///
/// 1. Stamps policy id and tag from the runtime context and the entity type
///    from the block config, overwriting whatever the document carried.
/// 2. With `forceNew`, clears the identity so the document persists as a
///    new record. The input document is never touched.
/// 3. Writes each static option override into the option map, creating the
///    map if needed. Entries not named by an override are kept.
pub fn preprocess(
    document: &WorkflowDocument,
    config: &BlockConfig,
    ctx: &RuntimeContext,
) -> WorkflowDocument {
    let mut document = document.clone();
    document.policy_id = Some(ctx.policy_id.clone());
    document.tag = ctx.tag.clone();
    document.entity_type = config.entity_type.clone();

    if config.force_new {
        document.id = None;
    }

    if !config.options.is_empty() {
        let option = document.option.get_or_insert_with(Map::new);
        for entry in &config.options {
            option.insert(entry.name.clone(), entry.value.clone());
        }
    }

    tracing::debug!(
        "Send Document: {}",
        serde_json::to_string(&document).unwrap_or_default()
    );

    document
}
