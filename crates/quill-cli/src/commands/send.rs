// crates/quill-cli/src/commands/send.rs
//
// `quill send --block <tag> --document <file> --user <id>` - run one
// document through a configured block and print the persisted result.

use std::fs;
use std::sync::Arc;

use clap::Args;

use quill_core::credential::JcsCredentialCodec;
use quill_core::document::{BlockState, WorkflowDocument};
use quill_core::identity::{AuthUser, KeyKind};
use quill_ledger::{HttpLedgerTransport, LedgerTransport, RecordingTransport};
use quill_router::{Collaborators, DocumentSenderBlock};
use quill_store::{InMemoryKeyStore, InMemoryTopicRegistry, InMemoryUserDirectory, RocksRecordStore};

use crate::config::{expand_tilde, QuillConfig};
use crate::runtime::LoggingRuntime;

/// Arguments for `quill send`.
#[derive(Debug, Args)]
pub struct SendCmd {
    /// Tag of the configured block to run.
    #[arg(long)]
    pub block: String,

    /// Path to the workflow document (JSON).
    #[arg(long)]
    pub document: String,

    /// Id of the acting user.
    #[arg(long)]
    pub user: String,
}

pub async fn run(cmd: &SendCmd, config: &QuillConfig) -> Result<(), Box<dyn std::error::Error>> {
    let entry = config
        .block(&cmd.block)
        .ok_or_else(|| format!("No block tagged '{}' in configuration", cmd.block))?;

    let contents = fs::read_to_string(&cmd.document)?;
    let document: WorkflowDocument = serde_json::from_str(&contents)?;

    let collaborators = build_collaborators(config).await?;
    let block = DocumentSenderBlock::new(
        entry.config.clone(),
        entry.context(&config.policy_id),
        &collaborators,
    );

    let user = AuthUser {
        id: cmd.user.clone(),
        did: config.user(&cmd.user).map(|u| u.did.clone()),
    };
    let mut state = BlockState::new(document);
    let result = block.run_action(&mut state, &user, &LoggingRuntime).await?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// RocksDB record stores under `data_dir`, directories seeded from config.
async fn build_collaborators(
    config: &QuillConfig,
) -> Result<Collaborators, Box<dyn std::error::Error>> {
    let data_dir = expand_tilde(&config.data_dir);
    fs::create_dir_all(&data_dir)?;
    let db_path = format!("{}/records_rocksdb", data_dir);
    let records = Arc::new(RocksRecordStore::open(&db_path)?);
    tracing::info!("Record store opened at {}", db_path);

    let users = Arc::new(InMemoryUserDirectory::new());
    let keys = Arc::new(InMemoryKeyStore::new());
    for user in &config.users {
        users.insert(user.account()).await;
        keys.insert(
            user.session_token.clone(),
            KeyKind::Ledger,
            user.did.clone(),
            user.private_key.clone(),
        )
        .await;
    }

    let topics = Arc::new(InMemoryTopicRegistry::new());
    for topic in &config.topics {
        topics.insert(topic.clone()).await;
    }

    let transport: Arc<dyn LedgerTransport> = match &config.ledger_endpoint {
        Some(endpoint) => {
            tracing::info!("Ledger gateway: {}", endpoint);
            Arc::new(HttpLedgerTransport::new(endpoint))
        }
        None => {
            tracing::warn!("No ledger_endpoint configured; submissions are recorded locally");
            Arc::new(RecordingTransport::new())
        }
    };

    Ok(Collaborators {
        credentials: records.clone(),
        identities: records.clone(),
        approvals: records,
        users,
        keys,
        topics,
        codec: Arc::new(JcsCredentialCodec),
        transport,
    })
}
