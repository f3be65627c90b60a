// crates/quill-ledger/src/channel.rs
//
// MessageChannel: a payer-bound channel for submitting messages to
// consensus topics.
//
// Sealing a message signs its canonical bytes with the payer key. Topics
// created with a submission key only accept messages that also carry a
// signature from that key, so the channel adds it when one is configured.

use std::sync::Arc;

use ed25519_dalek::SigningKey;
use serde::{Deserialize, Serialize};

use quill_core::crypto;
use quill_core::error::QuillError;
use quill_core::identity::SigningIdentity;

use crate::message::LedgerMessage;
use crate::transport::{LedgerTransport, SubmissionReceipt};

/// A message sealed for one topic, ready for transport.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignedEnvelope {
    pub topic_id: String,
    pub payer_account_id: String,
    pub message: LedgerMessage,
    /// Hex-encoded payer public key.
    pub payer_public_key: String,
    /// Hex-encoded payer signature over the canonical message bytes.
    pub payer_signature: String,
    /// Hex-encoded submission public key, when the topic is gated.
    #[serde(default)]
    pub submit_public_key: Option<String>,
    #[serde(default)]
    pub submit_signature: Option<String>,
}

impl SignedEnvelope {
    /// Check the payer signature and, if present, the submission signature.
    pub fn verify(&self) -> Result<bool, QuillError> {
        let bytes = self.message.to_bytes()?;

        if !verify_hex(&self.payer_public_key, &bytes, &self.payer_signature)? {
            return Ok(false);
        }

        match (&self.submit_public_key, &self.submit_signature) {
            (None, None) => Ok(true),
            (Some(public_key), Some(signature)) => verify_hex(public_key, &bytes, signature),
            _ => Ok(false),
        }
    }
}

fn verify_hex(
    public_key_hex: &str,
    message: &[u8],
    signature_hex: &str,
) -> Result<bool, QuillError> {
    let public_key: [u8; 32] = hex::decode(public_key_hex)?
        .as_slice()
        .try_into()
        .map_err(|_| QuillError::Crypto("Public key must be exactly 32 bytes".to_string()))?;
    let signature = hex::decode(signature_hex)?;
    crypto::verify_signature(&public_key, message, &signature)
}

/// Channel bound to a payer account and its private key.
pub struct MessageChannel {
    payer_account_id: String,
    payer_key: SigningKey,
    submission_key: Option<SigningKey>,
    transport: Arc<dyn LedgerTransport>,
}

impl MessageChannel {
    /// Open a channel for the given signing identity.
    pub fn new(
        identity: &SigningIdentity,
        transport: Arc<dyn LedgerTransport>,
    ) -> Result<Self, QuillError> {
        Ok(Self {
            payer_account_id: identity.ledger_account_id.clone(),
            payer_key: crypto::signing_key_from_hex(&identity.private_key)?,
            submission_key: None,
            transport,
        })
    }

    /// Configure the topic's submission key (hex-encoded secret).
    pub fn set_submission_key(&mut self, key_hex: &str) -> Result<(), QuillError> {
        self.submission_key = Some(crypto::signing_key_from_hex(key_hex)?);
        Ok(())
    }

    /// Sign a message for a topic without sending it.
    pub fn seal(
        &self,
        topic_id: &str,
        message: &LedgerMessage,
    ) -> Result<SignedEnvelope, QuillError> {
        let bytes = message.to_bytes()?;

        let (submit_public_key, submit_signature) = match &self.submission_key {
            Some(key) => (
                Some(hex::encode(key.verifying_key().to_bytes())),
                Some(hex::encode(crypto::sign_message(key, &bytes))),
            ),
            None => (None, None),
        };

        Ok(SignedEnvelope {
            topic_id: topic_id.to_string(),
            payer_account_id: self.payer_account_id.clone(),
            message: message.clone(),
            payer_public_key: hex::encode(self.payer_key.verifying_key().to_bytes()),
            payer_signature: hex::encode(crypto::sign_message(&self.payer_key, &bytes)),
            submit_public_key,
            submit_signature,
        })
    }

    /// Seal and submit a message to a topic, waiting for the network's receipt.
    pub async fn send(
        &self,
        topic_id: &str,
        message: &LedgerMessage,
    ) -> Result<SubmissionReceipt, QuillError> {
        let envelope = self.seal(topic_id, message)?;
        tracing::debug!(
            "Submitting {:?} message {} to topic {}",
            message.action,
            message.id,
            topic_id
        );

        let receipt = self.transport.submit(&envelope).await?;

        tracing::info!(
            "Topic {} accepted message {} (sequence {})",
            receipt.topic_id,
            receipt.message_hash,
            receipt.sequence_number
        );
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::RecordingTransport;
    use quill_core::credential::{CredentialCodec, JcsCredentialCodec};
    use quill_core::crypto::Keypair;
    use serde_json::json;

    fn identity() -> SigningIdentity {
        SigningIdentity {
            ledger_account_id: "0.0.1001".to_string(),
            did: "did:quill:alice".to_string(),
            private_key: Keypair::generate().secret_key_hex(),
        }
    }

    fn message() -> LedgerMessage {
        let credential = JcsCredentialCodec.from_tree(&json!({ "type": "VC" })).unwrap();
        LedgerMessage::create_credential(&credential)
    }

    #[test]
    fn test_seal_without_submission_key() {
        let channel =
            MessageChannel::new(&identity(), Arc::new(RecordingTransport::new())).unwrap();
        let envelope = channel.seal("0.0.5005", &message()).unwrap();

        assert_eq!(envelope.payer_account_id, "0.0.1001");
        assert!(envelope.submit_signature.is_none());
        assert!(envelope.verify().unwrap());
    }

    #[test]
    fn test_seal_with_submission_key() {
        let mut channel =
            MessageChannel::new(&identity(), Arc::new(RecordingTransport::new())).unwrap();
        channel
            .set_submission_key(&Keypair::generate().secret_key_hex())
            .unwrap();

        let envelope = channel.seal("0.0.5005", &message()).unwrap();
        assert!(envelope.submit_signature.is_some());
        assert!(envelope.verify().unwrap());
    }

    #[test]
    fn test_tampered_envelope_fails_verification() {
        let channel =
            MessageChannel::new(&identity(), Arc::new(RecordingTransport::new())).unwrap();
        let mut envelope = channel.seal("0.0.5005", &message()).unwrap();
        envelope.message.hash = "forged".to_string();
        assert!(!envelope.verify().unwrap());
    }

    #[test]
    fn test_bad_private_key_is_rejected() {
        let mut bad = identity();
        bad.private_key = "not-hex".to_string();
        assert!(matches!(
            MessageChannel::new(&bad, Arc::new(RecordingTransport::new())),
            Err(QuillError::Crypto(_))
        ));
    }

    #[tokio::test]
    async fn test_send_goes_through_transport() {
        let transport = Arc::new(RecordingTransport::new());
        let channel = MessageChannel::new(&identity(), transport.clone()).unwrap();

        let receipt = channel.send("0.0.5005", &message()).await.unwrap();
        assert_eq!(receipt.topic_id, "0.0.5005");
        assert_eq!(receipt.sequence_number, 1);
        assert_eq!(transport.submitted().await.len(), 1);
    }
}
