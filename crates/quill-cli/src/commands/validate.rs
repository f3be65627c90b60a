// crates/quill-cli/src/commands/validate.rs
//
// `quill validate` - static check of every configured block.

use quill_core::validation::ValidationResults;
use quill_router::validate_config;

use crate::config::QuillConfig;

/// Validate all blocks. Returns the collected results.
pub fn collect(config: &QuillConfig) -> ValidationResults {
    let mut results = ValidationResults::new();
    for block in &config.blocks {
        let ctx = block.context(&config.policy_id);
        validate_config(&block.config, ctx.block_id, &mut results);
    }
    results
}

/// Print the errors as JSON. Returns whether the configuration is valid.
pub async fn run(config: &QuillConfig) -> Result<bool, Box<dyn std::error::Error>> {
    let results = collect(config);
    println!("{}", serde_json::to_string_pretty(results.errors())?);

    if results.is_valid() {
        tracing::info!("{} block(s) valid", config.blocks.len());
    } else {
        tracing::warn!("{} configuration error(s)", results.errors().len());
    }
    Ok(results.is_valid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_reports_only_bad_blocks() {
        let config: QuillConfig = toml::from_str(
            r#"
[[blocks]]
id = "0191c5a4-7b1e-7c3a-9f00-000000000002"
tag = "bad"
dataType = "unsupported-tag"

[[blocks]]
tag = "good"
dataType = "approval"
"#,
        )
        .unwrap();

        let results = collect(&config);

        assert_eq!(results.errors().len(), 1);
        assert_eq!(
            results.errors()[0].block_id.to_string(),
            "0191c5a4-7b1e-7c3a-9f00-000000000002"
        );
    }

    #[test]
    fn test_block_without_data_type_is_reported() {
        let config: QuillConfig = toml::from_str(
            r#"
[[blocks]]
tag = "untyped"
entityType = "report"

[[blocks]]
tag = "good"
dataType = "credential"
"#,
        )
        .unwrap();

        let results = collect(&config);

        assert_eq!(results.errors().len(), 1);
        assert!(results.errors()[0]
            .message
            .contains("credential, identity-document, approval, ledger"));
    }
}
