// crates/quill-cli/src/commands/mod.rs
//
// Command module declarations for the Quill CLI.

pub mod keygen;
pub mod send;
pub mod validate;
