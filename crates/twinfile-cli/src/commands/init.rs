// Rust guideline compliant 2026-02-06

//! Implementation of the `twf init` command.
//!
//! Initializes twinfile in the current repository by creating the `.twinfile`
//! directory with a default configuration and installing the pre-commit hook.

use anyhow::Result;
use git2::Repository;
use std::fs;
use std::path::Path;
use twinfile_core::{Config, TWINFILE_DIR};

/// Initializes twinfile in the current repository.
///
/// Creates the `.twinfile` directory with a default `config.toml` (existing
/// configuration is never overwritten) and installs a `.git/hooks/pre-commit`
/// that runs `twf hooks pre-commit`.
///
/// # Returns
///
/// Ok if initialization was successful, Err otherwise.
///
/// # Errors
///
/// Returns an error if:
/// - The current directory is not inside a Git repository
/// - The `.twinfile` directory or configuration cannot be created
/// - The hook cannot be written or made executable
pub fn execute() -> Result<()> {
    Repository::discover(".")
        .map_err(|_| anyhow::anyhow!("Not a git repository. Run 'git init' first."))?;

    let twinfile_dir = Path::new(TWINFILE_DIR);
    if !twinfile_dir.exists() {
        fs::create_dir(twinfile_dir)?;
    }

    let config_path = twinfile_dir.join("config.toml");
    if !config_path.exists() {
        let config = Config::default();
        config.save(twinfile_dir)?;
    }

    fs::create_dir_all(".git/hooks")?;
    install_hook(".git/hooks/pre-commit", "twf hooks pre-commit")?;

    println!("✓ Twinfile initialized at .twinfile/");
    println!("  - Created .twinfile/config.toml");
    println!("  - Installed .git/hooks/pre-commit");
    println!("Add [[mirror]] entries to .twinfile/config.toml to start mirroring.");

    Ok(())
}

fn install_hook(path: &str, command: &str) -> Result<()> {
    let hook_content = format!("#!/bin/sh\n{}\n", command);
    fs::write(path, hook_content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(path, perms)?;
    }

    Ok(())
}
