// crates/quill-ledger/src/transport.rs
//
// Network transmission of sealed envelopes.
//
// `HttpLedgerTransport` talks to a consensus node's HTTP gateway using
// reqwest. `RecordingTransport` keeps envelopes in memory and hands out
// sequence numbers per topic; it can be told to fail.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use quill_core::error::QuillError;

use crate::channel::SignedEnvelope;

/// The network's acknowledgment of a submitted message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub topic_id: String,
    /// Position of the message in the topic's consensus order.
    pub sequence_number: u64,
    pub consensus_timestamp: DateTime<Utc>,
    pub message_hash: String,
}

/// Sends sealed envelopes to the ledger network.
#[async_trait]
pub trait LedgerTransport: Send + Sync {
    /// Submit an envelope and wait for the network's acknowledgment.
    async fn submit(&self, envelope: &SignedEnvelope) -> Result<SubmissionReceipt, QuillError>;
}

/// HTTP gateway client for a consensus node.
#[derive(Debug, Clone)]
pub struct HttpLedgerTransport {
    /// Base URL of the gateway (e.g., "http://127.0.0.1:5551").
    pub base_url: String,
    /// HTTP client instance.
    client: reqwest::Client,
}

impl HttpLedgerTransport {
    /// Create a new transport pointing at the given gateway base URL.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn messages_url(&self, topic_id: &str) -> String {
        format!("{}/api/v1/topics/{}/messages", self.base_url, topic_id)
    }
}

#[async_trait]
impl LedgerTransport for HttpLedgerTransport {
    /// POST /api/v1/topics/{topic_id}/messages with the envelope as JSON.
    async fn submit(&self, envelope: &SignedEnvelope) -> Result<SubmissionReceipt, QuillError> {
        let url = self.messages_url(&envelope.topic_id);
        let response = self
            .client
            .post(&url)
            .json(envelope)
            .send()
            .await
            .map_err(|e| QuillError::Network(format!("Ledger submit request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(QuillError::Network(format!(
                "Ledger submit failed ({}): {}",
                status, body
            )));
        }

        response
            .json::<SubmissionReceipt>()
            .await
            .map_err(|e| QuillError::Network(format!("Ledger receipt parse failed: {}", e)))
    }
}

/// In-memory transport that records every envelope it accepts.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    submitted: Mutex<Vec<SignedEnvelope>>,
    failure: Mutex<Option<String>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following submission fail with the given message.
    pub async fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock().await = Some(message.into());
    }

    /// Envelopes accepted so far, in submission order.
    pub async fn submitted(&self) -> Vec<SignedEnvelope> {
        self.submitted.lock().await.clone()
    }
}

#[async_trait]
impl LedgerTransport for RecordingTransport {
    async fn submit(&self, envelope: &SignedEnvelope) -> Result<SubmissionReceipt, QuillError> {
        if let Some(message) = self.failure.lock().await.clone() {
            return Err(QuillError::Network(message));
        }

        if !envelope.verify()? {
            return Err(QuillError::Ledger(format!(
                "Invalid signature on message {}",
                envelope.message.id
            )));
        }

        let mut submitted = self.submitted.lock().await;
        submitted.push(envelope.clone());
        let sequence_number = submitted
            .iter()
            .filter(|e| e.topic_id == envelope.topic_id)
            .count() as u64;

        Ok(SubmissionReceipt {
            topic_id: envelope.topic_id.clone(),
            sequence_number,
            consensus_timestamp: Utc::now(),
            message_hash: envelope.message.hash.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::MessageChannel;
    use crate::message::LedgerMessage;
    use quill_core::credential::{CredentialCodec, JcsCredentialCodec};
    use quill_core::crypto::Keypair;
    use quill_core::identity::SigningIdentity;
    use serde_json::json;
    use std::sync::Arc;

    fn envelope(topic_id: &str) -> SignedEnvelope {
        let identity = SigningIdentity {
            ledger_account_id: "0.0.1001".to_string(),
            did: "did:quill:alice".to_string(),
            private_key: Keypair::generate().secret_key_hex(),
        };
        let channel = MessageChannel::new(&identity, Arc::new(RecordingTransport::new())).unwrap();
        let credential = JcsCredentialCodec.from_tree(&json!({ "type": "VC" })).unwrap();
        channel
            .seal(topic_id, &LedgerMessage::create_credential(&credential))
            .unwrap()
    }

    #[test]
    fn test_http_messages_url() {
        let transport = HttpLedgerTransport::new("http://127.0.0.1:5551/");
        assert_eq!(
            transport.messages_url("0.0.5005"),
            "http://127.0.0.1:5551/api/v1/topics/0.0.5005/messages"
        );
    }

    #[tokio::test]
    async fn test_sequence_numbers_are_per_topic() {
        let transport = RecordingTransport::new();
        let a1 = transport.submit(&envelope("a")).await.unwrap();
        let b1 = transport.submit(&envelope("b")).await.unwrap();
        let a2 = transport.submit(&envelope("a")).await.unwrap();

        assert_eq!(a1.sequence_number, 1);
        assert_eq!(b1.sequence_number, 1);
        assert_eq!(a2.sequence_number, 2);
    }

    #[tokio::test]
    async fn test_failure_mode_rejects_and_records_nothing() {
        let transport = RecordingTransport::new();
        transport.fail_with("gateway down").await;

        let err = transport.submit(&envelope("a")).await.unwrap_err();
        assert!(matches!(err, QuillError::Network(_)));
        assert!(transport.submitted().await.is_empty());
    }

    #[tokio::test]
    async fn test_rejects_forged_envelope() {
        let transport = RecordingTransport::new();
        let mut forged = envelope("a");
        forged.payer_signature = hex::encode([0u8; 64]);
        assert!(matches!(
            transport.submit(&forged).await,
            Err(QuillError::Ledger(_))
        ));
    }
}
