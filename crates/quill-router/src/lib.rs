// crates/quill-router/src/lib.rs
//
// quill-router: The document sender block.
//
// Given an in-flight workflow document, the block stamps routing metadata
// and static option overrides onto it, then persists it with the strategy
// selected by the configured document-type tag:
//
//   credential         -> upsert by content hash
//   identity-document  -> upsert by DID
//   approval           -> upsert by record id
//   ledger             -> signed create-credential message to the policy's
//                         root consensus topic
//
// A static validation pass reports unsupported tags without failing.

pub mod block;
pub mod ledger;
pub mod preprocess;
pub mod router;
pub mod strategies;
pub mod validate;

pub use block::{Collaborators, DocumentSenderBlock, BLOCK_TYPE};
pub use ledger::LedgerSubmission;
pub use preprocess::preprocess;
pub use router::{PersistenceRouter, PersistenceStrategy, StrategyTable};
pub use strategies::{ApprovalStrategy, CredentialStrategy, IdentityStrategy};
pub use validate::validate_config;
