// crates/quill-store/src/lib.rs
//
// quill-store: Storage layer for the Quill router.
//
// Provides RecordStore backends (in-memory and RocksDB) for credential,
// identity, and approval records, plus in-memory implementations of the
// user directory, key store, and topic registry collaborators.

pub mod directory;
pub mod memory;
pub mod rocks;

// Re-export key types for ergonomic access from downstream crates.
pub use directory::{InMemoryKeyStore, InMemoryTopicRegistry, InMemoryUserDirectory};
pub use memory::InMemoryRecordStore;
pub use rocks::RocksRecordStore;
