// crates/quill-cli/src/commands/keygen.rs
//
// `quill keygen` - print a fresh ed25519 key pair.

use quill_core::crypto::Keypair;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let keypair = Keypair::generate();

    println!("Public key:  {}", keypair.public_key_hex());
    println!("Private key: {}", keypair.secret_key_hex());
    println!();
    println!("Use the private key as a user's `private_key` or a topic's `submission_key`.");

    Ok(())
}
