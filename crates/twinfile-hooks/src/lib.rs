// Rust guideline compliant 2026-02-06

//! Twinfile Git Hooks
//!
//! This crate provides the Git hook implementation for twinfile:
//! - Pre-commit mirror sync

pub mod pre_commit;

pub use pre_commit::pre_commit_hook;
