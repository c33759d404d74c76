// Rust guideline compliant 2026-02-06

//! Error types for the twinfile core library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for twinfile operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for twinfile operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Git operation error.
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    /// Invalid configuration.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// No file exists at the expected hook path.
    #[error("Hook not found: {}", .0.display())]
    HookNotFound(PathBuf),

    /// A file exists at the hook path but lacks execute permission.
    #[error("Hook not executable: {}", .0.display())]
    HookNotExecutable(PathBuf),

    /// A configured mirror source file is missing.
    #[error("Source file not found: {}", .0.display())]
    SourceMissing(PathBuf),

    /// A collected patch could not be applied to the mirror.
    #[error("Failed to patch {}: {}", .dest.display(), .reason)]
    PatchFailed {
        /// Mirror path the patch targeted.
        dest: PathBuf,
        /// Why the application failed.
        reason: String,
    },
}
