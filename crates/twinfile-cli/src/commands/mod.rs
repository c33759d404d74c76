// Rust guideline compliant 2026-02-06

//! CLI command implementations.

pub mod hooks;
pub mod init;
pub mod sync;
pub mod test_hook;
