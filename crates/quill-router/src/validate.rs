// crates/quill-router/src/validate.rs
//
// Static configuration check run at policy deployment. Problems are
// appended to the shared results collector; nothing is returned as an error.

use uuid::Uuid;

use quill_core::config::BlockConfig;
use quill_core::error::QuillError;
use quill_core::validation::ValidationResults;

fn check_config(config: &BlockConfig) -> Result<(), QuillError> {
    config.data_type()?;
    Ok(())
}

/// Validate a block configuration, recording problems against `block_id`.
pub fn validate_config(config: &BlockConfig, block_id: Uuid, results: &mut ValidationResults) {
    record_outcome(check_config(config), block_id, results);
}

/// Config errors are reported as-is; any other error from a check is
/// reported generically so it never escapes validation.
fn record_outcome(
    outcome: Result<(), QuillError>,
    block_id: Uuid,
    results: &mut ValidationResults,
) {
    match outcome {
        Ok(()) => {}
        Err(QuillError::InvalidConfig(message)) => results.add_block_error(block_id, message),
        Err(e) => results.add_block_error(block_id, format!("Unhandled exception {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::config::DataType;

    fn config(tag: &str) -> BlockConfig {
        BlockConfig {
            data_type: tag.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_supported_tags_pass() {
        let mut results = ValidationResults::new();
        for data_type in DataType::ALL {
            validate_config(&config(data_type.as_str()), Uuid::now_v7(), &mut results);
        }
        assert!(results.is_valid());
    }

    #[test]
    fn test_unsupported_tag_records_one_error() {
        let block_id = Uuid::now_v7();
        let mut results = ValidationResults::new();

        validate_config(&config("unsupported-tag"), block_id, &mut results);

        assert_eq!(results.errors().len(), 1);
        let error = &results.errors()[0];
        assert_eq!(error.block_id, block_id);
        assert_eq!(
            error.message,
            "Option \"dataType\" must be one of credential, identity-document, approval, ledger"
        );
    }

    #[test]
    fn test_empty_tag_is_unsupported() {
        let mut results = ValidationResults::new();
        validate_config(&config(""), Uuid::now_v7(), &mut results);
        assert_eq!(results.errors().len(), 1);
    }

    #[test]
    fn test_other_check_failures_reported_generically() {
        let block_id = Uuid::now_v7();
        let mut results = ValidationResults::new();

        record_outcome(
            Err(QuillError::Serialization("bad option value".to_string())),
            block_id,
            &mut results,
        );

        assert_eq!(results.errors().len(), 1);
        assert_eq!(
            results.errors()[0].message,
            "Unhandled exception Serialization error: bad option value"
        );
        assert_eq!(results.errors()[0].block_id, block_id);
    }

    #[test]
    fn test_sibling_blocks_still_validated() {
        let bad = Uuid::now_v7();
        let good = Uuid::now_v7();
        let mut results = ValidationResults::new();

        validate_config(&config("bogus"), bad, &mut results);
        validate_config(&config("approval"), good, &mut results);
        validate_config(&config("also-bogus"), good, &mut results);

        assert_eq!(results.errors_for(bad).count(), 1);
        assert_eq!(results.errors_for(good).count(), 1);
    }
}
