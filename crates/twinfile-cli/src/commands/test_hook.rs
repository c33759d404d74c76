// Rust guideline compliant 2026-02-06

//! Implementation of the `twf test` command.
//!
//! Manually triggers the repository's `.git/hooks/pre-commit`, which Git
//! otherwise only runs during a commit, and reports its exit status.

use anyhow::Result;
use std::path::PathBuf;
use twinfile_core::{run_hook, runner_dir};

/// Runs the pre-commit hook and returns its exit code.
///
/// Without a path argument the run is anchored to the directory containing
/// the `twf` executable, never the caller's working directory. In JSON mode
/// the banner is suppressed and the report is printed as JSON instead; the
/// hook's own output still passes through live either way.
///
/// # Arguments
///
/// * `path` - Directory to run in, overriding the default
/// * `json` - Whether to print the report as JSON
///
/// # Returns
///
/// The hook's exit status (or a spawn-failure sentinel), for the caller to
/// propagate as the process exit code.
///
/// # Errors
///
/// Returns an error if the target directory cannot be resolved or output
/// cannot be written. Hook failures are reported through the exit code.
pub fn execute(path: Option<String>, json: bool) -> Result<i32> {
    let dir = match path {
        Some(path) => PathBuf::from(path),
        None => runner_dir()?,
    };

    let report = if json {
        let mut sink = Vec::new();
        let report = run_hook(&dir, &mut sink)?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        report
    } else {
        run_hook(&dir, &mut std::io::stdout())?
    };

    Ok(report.exit_code)
}
