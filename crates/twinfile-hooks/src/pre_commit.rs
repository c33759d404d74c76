// Rust guideline compliant 2026-02-06

//! Pre-commit hook implementation.
//!
//! Syncs every configured mirror pair before the commit lands, so the
//! mirrors ride along with the change that produced them.

use anyhow::Result;
use std::path::Path;
use twinfile_core::{sync_repo, Config, TWINFILE_DIR};

/// Runs the pre-commit hook.
///
/// # Arguments
///
/// * `repo_path` - Path to the Git repository
///
/// # Returns
///
/// Ok if every configured mirror was synced, Err otherwise. A nonzero exit
/// from the hook binary blocks the commit, per Git convention.
///
/// # Errors
///
/// Returns an error if:
/// - `.twinfile/config.toml` is absent (the hook is installed but the
///   repository was never initialized)
/// - The configuration is invalid
/// - A source file is missing or a patch cannot be applied
pub fn pre_commit_hook(repo_path: &Path) -> Result<()> {
    let twinfile_dir = repo_path.join(TWINFILE_DIR);
    if !twinfile_dir.join("config.toml").exists() {
        anyhow::bail!("Twinfile not initialized. Run 'twf init' first.");
    }

    let config = Config::load(&twinfile_dir)?;
    if config.mirrors.is_empty() {
        println!("No mirror pairs configured in .twinfile/config.toml");
        return Ok(());
    }

    let reports = sync_repo(repo_path, &config)?;
    for report in &reports {
        println!("✓ {}", report.describe());
    }

    Ok(())
}
