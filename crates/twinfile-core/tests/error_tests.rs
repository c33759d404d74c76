// Rust guideline compliant 2026-02-06

//! Unit tests for error types and messages.

use std::path::PathBuf;
use twinfile_core::Error;

#[test]
fn test_io_error_formatting() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error = Error::Io(io_err);
    let msg = error.to_string();
    assert!(
        msg.contains("IO error"),
        "IO error should contain 'IO error' prefix"
    );
}

#[test]
fn test_hook_not_found_formatting() {
    let error = Error::HookNotFound(PathBuf::from(".git/hooks/pre-commit"));
    assert_eq!(error.to_string(), "Hook not found: .git/hooks/pre-commit");
}

#[test]
fn test_hook_not_executable_formatting() {
    let error = Error::HookNotExecutable(PathBuf::from(".git/hooks/pre-commit"));
    assert_eq!(
        error.to_string(),
        "Hook not executable: .git/hooks/pre-commit"
    );
}

#[test]
fn test_source_missing_formatting() {
    let error = Error::SourceMissing(PathBuf::from("Live/Sales.twb"));
    assert_eq!(error.to_string(), "Source file not found: Live/Sales.twb");
}

#[test]
fn test_patch_failed_preserves_reason() {
    let error = Error::PatchFailed {
        dest: PathBuf::from("Live/Customers/Sales.twb"),
        reason: "corrupt patch at line 4".to_string(),
    };
    let msg = error.to_string();
    assert!(msg.contains("Live/Customers/Sales.twb"));
    assert!(msg.contains("corrupt patch at line 4"));
}

#[test]
fn test_invalid_config_formatting() {
    let error = Error::InvalidConfig("duplicate mirror dest: a.txt".to_string());
    assert_eq!(error.to_string(), "Invalid config: duplicate mirror dest: a.txt");
}
