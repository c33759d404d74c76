// Rust guideline compliant 2026-02-06

//! Hook command wrappers for invoking twinfile Git hooks from the CLI.

use anyhow::Result;

/// Runs the requested hook action.
///
/// # Arguments
///
/// * `action` - Hook action to run
///
/// # Returns
///
/// Ok if the hook succeeds, Err otherwise.
///
/// # Errors
///
/// Returns an error if the hook fails; a nonzero exit blocks the commit.
pub fn execute(action: HookAction) -> Result<()> {
    let repo_path = std::env::current_dir()?;
    match action {
        HookAction::PreCommit => twinfile_hooks::pre_commit_hook(&repo_path),
    }
}

/// Supported hook actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::Subcommand)]
pub enum HookAction {
    /// Run the pre-commit hook
    PreCommit,
}
