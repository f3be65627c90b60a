// crates/quill-cli/src/main.rs
//
// CLI entrypoint for the Quill router.
//
// Loads the TOML configuration, initializes tracing, and dispatches to the
// validate, send, and keygen subcommands.

mod commands;
mod config;
mod runtime;

use clap::{Parser, Subcommand};
use commands::send::SendCmd;
use config::QuillConfig;

/// Quill: document finalization and ledger-submission router.
#[derive(Parser, Debug)]
#[command(name = "quill", version = "0.1.0", about = "Quill document sender CLI")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, default_value = "~/.quill/config.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate every configured block and print the errors as JSON.
    Validate,

    /// Run a document through a configured block.
    Send(SendCmd),

    /// Generate an ed25519 key pair.
    Keygen,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // A missing file means defaults; an unreadable or malformed one is fatal.
    let (config, from_file) = QuillConfig::load_or_default(&cli.config)?;

    // RUST_LOG wins over the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if from_file {
        tracing::info!("Loaded configuration from {}", cli.config);
    } else {
        tracing::warn!("No config file at {}. Using defaults.", cli.config);
    }

    match &cli.command {
        Commands::Validate => {
            if !commands::validate::run(&config).await? {
                std::process::exit(1);
            }
        }
        Commands::Send(cmd) => commands::send::run(cmd, &config).await?,
        Commands::Keygen => commands::keygen::run().await?,
    }

    Ok(())
}
