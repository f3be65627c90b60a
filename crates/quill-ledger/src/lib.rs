// crates/quill-ledger/src/lib.rs
//
// quill-ledger: Ledger client pieces used by the Quill router.
//
// Builds create-credential messages, signs them with the payer's key (and
// the topic's submission key when the topic has one), and hands the sealed
// envelope to a transport: HTTP for a real consensus node, or an in-memory
// recorder for tests and dry runs.

pub mod channel;
pub mod message;
pub mod transport;

// Re-export key types for ergonomic access from downstream crates.
pub use channel::{MessageChannel, SignedEnvelope};
pub use message::{LedgerMessage, MessageAction, MessageKind};
pub use transport::{HttpLedgerTransport, LedgerTransport, RecordingTransport, SubmissionReceipt};
