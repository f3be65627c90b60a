// crates/quill-cli/src/config.rs
//
// Runtime configuration for the Quill CLI.
// Loaded from a TOML file or populated with defaults.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use uuid::Uuid;

use quill_core::config::{BlockConfig, RuntimeContext};
use quill_core::identity::UserAccount;
use quill_core::topic::TopicRecord;
use quill_router::BLOCK_TYPE;

/// Runtime configuration for the CLI.
#[derive(Debug, Clone, Deserialize)]
pub struct QuillConfig {
    /// Policy the configured blocks belong to.
    #[serde(default = "default_policy_id")]
    pub policy_id: String,

    /// Directory for local data storage (RocksDB).
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Ledger gateway base URL. When unset, submissions are recorded in memory.
    #[serde(default)]
    pub ledger_endpoint: Option<String>,

    #[serde(default)]
    pub blocks: Vec<BlockEntry>,

    #[serde(default)]
    pub users: Vec<UserEntry>,

    #[serde(default)]
    pub topics: Vec<TopicRecord>,
}

/// One configured document sender block.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockEntry {
    /// Stable block id. Generated per run when absent.
    #[serde(default)]
    pub id: Option<Uuid>,
    pub tag: String,
    #[serde(flatten)]
    pub config: BlockConfig,
}

impl BlockEntry {
    /// Runtime context for this block under the given policy.
    pub fn context(&self, policy_id: &str) -> RuntimeContext {
        let ctx = RuntimeContext::new(policy_id, BLOCK_TYPE).with_tag(self.tag.clone());
        match self.id {
            Some(id) => ctx.with_block_id(id),
            None => ctx,
        }
    }
}

/// A user account plus the ledger key the local key store hands out for it.
#[derive(Debug, Clone, Deserialize)]
pub struct UserEntry {
    pub id: String,
    pub ledger_account_id: String,
    pub did: String,
    pub session_token: String,
    /// Hex-encoded ed25519 ledger key.
    pub private_key: String,
}

impl UserEntry {
    pub fn account(&self) -> UserAccount {
        UserAccount {
            id: self.id.clone(),
            ledger_account_id: self.ledger_account_id.clone(),
            did: self.did.clone(),
            session_token: self.session_token.clone(),
        }
    }
}

fn default_policy_id() -> String {
    "default".to_string()
}

fn default_data_dir() -> String {
    "~/.quill/data".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for QuillConfig {
    fn default() -> Self {
        Self {
            policy_id: default_policy_id(),
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            ledger_endpoint: None,
            blocks: Vec::new(),
            users: Vec::new(),
            topics: Vec::new(),
        }
    }
}

impl QuillConfig {
    /// Load configuration from a TOML file at the given path.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(expand_tilde(path))?;
        let config: QuillConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration, using defaults only when the file does not exist.
    ///
    /// Returns the config and whether it came from the file. A file that
    /// exists but cannot be read or parsed is an error.
    pub fn load_or_default(path: &str) -> Result<(Self, bool), Box<dyn std::error::Error>> {
        if Path::new(&expand_tilde(path)).exists() {
            Ok((Self::load(path)?, true))
        } else {
            Ok((Self::default(), false))
        }
    }

    /// Find a configured block by tag.
    pub fn block(&self, tag: &str) -> Option<&BlockEntry> {
        self.blocks.iter().find(|b| b.tag == tag)
    }

    pub fn user(&self, id: &str) -> Option<&UserEntry> {
        self.users.iter().find(|u| u.id == id)
    }
}

/// Expand a leading `~/` to the home directory.
pub fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return format!("{}/{}", home.display(), rest);
        }
    }
    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::config::DataType;
    use quill_core::topic::TopicType;
    use serde_json::json;

    const SAMPLE: &str = r#"
policy_id = "policy-1"
data_dir = "/tmp/quill"
ledger_endpoint = "http://127.0.0.1:5551"

[[blocks]]
id = "0191c5a4-7b1e-7c3a-9f00-000000000001"
tag = "save_credential"
dataType = "credential"
entityType = "approved-report"
forceNew = true
options = [{ name = "status", value = "approved" }]

[[blocks]]
tag = "anchor"
dataType = "ledger"

[[users]]
id = "owner-1"
ledger_account_id = "0.0.1001"
did = "did:quill:owner-1"
session_token = "token-1"
private_key = "00"

[[topics]]
policy_id = "policy-1"
topic_type = "root-policy-topic"
topic_id = "0.0.5005"
"#;

    #[test]
    fn test_parse_full_config() {
        let config: QuillConfig = toml::from_str(SAMPLE).unwrap();

        assert_eq!(config.policy_id, "policy-1");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.blocks.len(), 2);

        let block = config.block("save_credential").unwrap();
        assert!(block.id.is_some());
        assert_eq!(block.config.data_type().unwrap(), DataType::Credential);
        assert_eq!(block.config.entity_type.as_deref(), Some("approved-report"));
        assert!(block.config.force_new);
        assert_eq!(block.config.options[0].value, json!("approved"));

        let anchor = config.block("anchor").unwrap();
        assert!(anchor.id.is_none());
        assert!(!anchor.config.force_new);

        assert_eq!(config.user("owner-1").unwrap().account().did, "did:quill:owner-1");
        assert_eq!(config.topics[0].topic_type, TopicType::RootPolicyTopic);
        assert!(config.topics[0].submission_key.is_none());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: QuillConfig = toml::from_str("").unwrap();
        assert_eq!(config.data_dir, "~/.quill/data");
        assert!(config.ledger_endpoint.is_none());
        assert!(config.blocks.is_empty());
    }

    #[test]
    fn test_block_context_keeps_configured_id() {
        let config: QuillConfig = toml::from_str(SAMPLE).unwrap();
        let block = config.block("save_credential").unwrap();

        let ctx = block.context(&config.policy_id);
        assert_eq!(Some(ctx.block_id), block.id);
        assert_eq!(ctx.tag.as_deref(), Some("save_credential"));
        assert_eq!(ctx.block_type, BLOCK_TYPE);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join(format!("quill_missing_{}.toml", Uuid::now_v7()));

        let (config, from_file) = QuillConfig::load_or_default(path.to_str().unwrap()).unwrap();

        assert!(!from_file);
        assert!(config.blocks.is_empty());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("quill_bad_{}.toml", Uuid::now_v7()));
        fs::write(&path, "[[blocks]]\ntag = \"a\"\nforceNew = \"yes\"\n").unwrap();

        let result = QuillConfig::load_or_default(path.to_str().unwrap());

        let _ = fs::remove_file(&path);
        assert!(result.is_err());
    }

    #[test]
    fn test_block_without_data_type_still_loads() {
        let config: QuillConfig = toml::from_str("[[blocks]]\ntag = \"untyped\"\n").unwrap();
        assert_eq!(config.block("untyped").unwrap().config.data_type, "");
    }

    #[test]
    fn test_expand_tilde_leaves_absolute_paths() {
        assert_eq!(expand_tilde("/var/lib/quill"), "/var/lib/quill");
    }
}
