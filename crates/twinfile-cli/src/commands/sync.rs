// Rust guideline compliant 2026-02-12

//! Implementation of the `twf sync` command.
//!
//! Runs the mirror sync directly, outside the pre-commit hook.

use anyhow::Result;
use std::path::Path;
use twinfile_core::{pending_pairs, sync_repo, Config, TWINFILE_DIR};

/// Syncs every configured mirror pair in the current repository.
///
/// # Arguments
///
/// * `dry_run` - Whether to report pending pairs without touching the tree
///
/// # Returns
///
/// Ok if the sync (or preview) completes, Err otherwise.
///
/// # Errors
///
/// Returns an error if:
/// - Twinfile is not initialized in the current directory
/// - The configuration is invalid
/// - A source file is missing or a patch cannot be applied
pub fn execute(dry_run: bool) -> Result<()> {
    let twinfile_dir = Path::new(TWINFILE_DIR);
    if !twinfile_dir.exists() {
        anyhow::bail!("Twinfile not initialized. Run 'twf init' first.");
    }

    let config = Config::load(twinfile_dir)?;
    if config.mirrors.is_empty() {
        println!("No mirror pairs configured in .twinfile/config.toml");
        return Ok(());
    }

    let root = std::env::current_dir()?;

    if dry_run {
        let pending = pending_pairs(&root, &config)?;
        if pending.is_empty() {
            println!("✓ All mirrors up to date.");
        } else {
            for pair in pending {
                println!("Would sync {} -> {}", pair.source, pair.dest);
            }
        }
        return Ok(());
    }

    let reports = sync_repo(&root, &config)?;
    for report in &reports {
        println!("✓ {}", report.describe());
    }

    Ok(())
}
