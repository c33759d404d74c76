// Rust guideline compliant 2026-02-06

//! Twinfile Core Library
//!
//! This crate provides the foundational components for twinfile:
//! - Hook runner (manual invocation of the repository pre-commit hook)
//! - Mirror-sync engine (replaying file changes onto a mirrored copy)
//! - Configuration loading and validation
//! - Error types and result handling

pub mod config;
pub mod error;
pub mod runner;
pub mod sync;

pub use config::{Config, MirrorPair, TWINFILE_DIR};
pub use error::{Error, Result};
pub use runner::{run_hook, runner_dir, HookReport, HOOK_RELATIVE_PATH};
pub use sync::{pending_pairs, sync_repo, SyncOutcome, SyncReport};
