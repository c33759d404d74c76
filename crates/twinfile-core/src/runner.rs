// Rust guideline compliant 2026-02-06

//! Manual hook runner.
//!
//! Invokes the repository's `.git/hooks/pre-commit` by hand, with the same
//! banner a developer would see from the original wrapper script, and reports
//! the hook's exit status. Git only runs the hook during `git commit`; this
//! lets it be exercised directly.

use crate::{Error, Result};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Hook path, relative to the repository root.
pub const HOOK_RELATIVE_PATH: &str = ".git/hooks/pre-commit";

/// Delimiter line printed around the hook's own output.
const DELIMITER: &str = "==========================================";

/// Exit code reported when no file exists at the hook path.
pub const EXIT_HOOK_NOT_FOUND: i32 = 127;

/// Exit code reported when the hook file is not executable.
pub const EXIT_HOOK_NOT_EXECUTABLE: i32 = 126;

/// Result of a manual hook invocation.
#[derive(Debug, Clone, Serialize)]
pub struct HookReport {
    /// Canonical directory the hook ran in.
    pub directory: PathBuf,
    /// Exit status of the hook process (or a spawn-failure sentinel).
    pub exit_code: i32,
}

/// Returns the directory containing the running executable.
///
/// The original wrapper anchored itself to its own location rather than the
/// caller's working directory; this is the equivalent for an installed binary.
///
/// # Errors
///
/// Returns an error if the executable path cannot be resolved.
pub fn runner_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let dir = exe.parent().ok_or_else(|| {
        Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "executable has no parent directory",
        ))
    })?;
    Ok(dir.to_path_buf())
}

/// Runs the pre-commit hook in `dir` and reports its exit status.
///
/// Makes `dir` the working directory for the invocation, prints the banner
/// lines to `out`, and executes `.git/hooks/pre-commit` with no arguments and
/// inherited standard streams, so the hook's output and prompts pass through
/// live between the delimiter lines. A hook that cannot be started does not
/// fail the runner: the banner completes and a spawn-failure sentinel (127
/// missing, 126 not executable) is reported instead.
///
/// # Arguments
///
/// * `dir` - Directory to run in; must contain `.git/hooks`
/// * `out` - Destination for the banner lines
///
/// # Returns
///
/// A [`HookReport`] with the canonical directory and the exit status.
///
/// # Errors
///
/// Returns an error only if `dir` cannot be resolved or made current, or the
/// banner cannot be written. Hook failures are reported, not propagated.
pub fn run_hook<W: Write>(dir: &Path, out: &mut W) -> Result<HookReport> {
    let dir = dir.canonicalize()?;
    std::env::set_current_dir(&dir)?;

    writeln!(out, "Testing pre-commit hook...")?;
    writeln!(out, "Current directory: {}", dir.display())?;
    writeln!(out)?;
    writeln!(out, "Running hook...")?;
    writeln!(out, "{}", DELIMITER)?;
    // Banner must land before the hook's inherited output.
    out.flush()?;

    let exit_code = match invoke_hook(&dir) {
        Ok(code) => code,
        Err(err) => {
            let code = spawn_failure_code(&err);
            eprintln!("twinfile: {}", err);
            code
        }
    };

    writeln!(out, "{}", DELIMITER)?;
    writeln!(out)?;
    writeln!(out, "Hook finished with exit code: {}", exit_code)?;
    out.flush()?;

    Ok(HookReport {
        directory: dir,
        exit_code,
    })
}

/// Spawns the hook and waits for it, translating spawn failures into
/// [`Error::HookNotFound`] / [`Error::HookNotExecutable`].
fn invoke_hook(dir: &Path) -> Result<i32> {
    let hook_path = dir.join(HOOK_RELATIVE_PATH);

    let status = Command::new(&hook_path)
        .current_dir(dir)
        .status()
        .map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => Error::HookNotFound(hook_path.clone()),
            std::io::ErrorKind::PermissionDenied => Error::HookNotExecutable(hook_path.clone()),
            _ if is_exec_format_error(&err) => Error::HookNotExecutable(hook_path.clone()),
            _ => Error::Io(err),
        })?;

    Ok(exit_code_of(status))
}

/// ENOEXEC: the file exists and is executable but is not a runnable image
/// (for example a script with no shebang). Shells report 126 for this.
#[cfg(unix)]
fn is_exec_format_error(err: &std::io::Error) -> bool {
    err.raw_os_error() == Some(8)
}

#[cfg(not(unix))]
fn is_exec_format_error(_err: &std::io::Error) -> bool {
    false
}

/// Maps a spawn failure to its shell-convention exit code.
fn spawn_failure_code(err: &Error) -> i32 {
    match err {
        Error::HookNotFound(_) => EXIT_HOOK_NOT_FOUND,
        Error::HookNotExecutable(_) => EXIT_HOOK_NOT_EXECUTABLE,
        _ => 1,
    }
}

#[cfg(unix)]
fn exit_code_of(status: std::process::ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    match status.code() {
        Some(code) => code,
        // Shell convention for signal death.
        None => 128 + status.signal().unwrap_or(0),
    }
}

#[cfg(not(unix))]
fn exit_code_of(status: std::process::ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}
