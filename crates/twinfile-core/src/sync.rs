// Rust guideline compliant 2026-02-12

//! Mirror-sync engine.
//!
//! Replays changes made to a source file onto a mirrored copy in the same
//! repository. The change set is collected as a Git patch (staged changes
//! first, then the last commit, then the range since the merge base with the
//! remote default branch), retargeted at the mirror path, and applied to the
//! working tree.

use crate::config::{Config, MirrorPair};
use crate::{Error, Result};
use git2::{ApplyLocation, Diff, DiffFormat, DiffOptions, Repository, Tree};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// What the sync did for a single mirror pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No changes detected for the source file.
    Unchanged,
    /// Mirror was missing and was created as a full copy of the source.
    Created,
    /// Patch applied natively.
    Patched,
    /// Native application failed; `git apply --3way` succeeded.
    PatchedThreeWay,
}

/// Per-pair sync result.
#[derive(Debug, Clone)]
pub struct SyncReport {
    /// The pair that was synced.
    pub pair: MirrorPair,
    /// What happened.
    pub outcome: SyncOutcome,
}

impl SyncReport {
    /// Human-readable one-line summary of the outcome.
    pub fn describe(&self) -> String {
        match self.outcome {
            SyncOutcome::Unchanged => format!("{} is up to date", self.pair.dest),
            SyncOutcome::Created => {
                format!("Created {} from {}", self.pair.dest, self.pair.source)
            }
            SyncOutcome::Patched => {
                format!("Applied changes from {} to {}", self.pair.source, self.pair.dest)
            }
            SyncOutcome::PatchedThreeWay => {
                format!("Applied changes using 3-way merge to {}", self.pair.dest)
            }
        }
    }
}

/// Syncs every configured mirror pair in the repository at `root`.
///
/// # Arguments
///
/// * `root` - Repository root (or any path inside it)
/// * `config` - Loaded twinfile configuration
///
/// # Returns
///
/// One [`SyncReport`] per configured pair, in configuration order.
///
/// # Errors
///
/// Returns an error if `root` is not inside a Git repository, a source file
/// is missing, or a patch cannot be applied by either strategy.
pub fn sync_repo(root: &Path, config: &Config) -> Result<Vec<SyncReport>> {
    let repo = Repository::discover(root)?;
    let mut reports = Vec::with_capacity(config.mirrors.len());

    for pair in &config.mirrors {
        let outcome = sync_pair(&repo, config, pair)?;
        reports.push(SyncReport {
            pair: pair.clone(),
            outcome,
        });
    }

    Ok(reports)
}

/// Returns the configured pairs that currently have pending changes.
///
/// A pair is pending when its source has a collectable diff or its mirror
/// does not exist yet. Used by dry-run reporting; the working tree is not
/// touched.
///
/// # Errors
///
/// Returns an error if `root` is not inside a Git repository or a source
/// file is missing.
pub fn pending_pairs(root: &Path, config: &Config) -> Result<Vec<MirrorPair>> {
    let repo = Repository::discover(root)?;
    let workdir = workdir_of(&repo)?;
    let mut pending = Vec::new();

    for pair in &config.mirrors {
        ensure_source_exists(&workdir, pair)?;
        let has_diff = collect_diff(&repo, &pair.source)?.is_some();
        if has_diff || !workdir.join(&pair.dest).exists() {
            pending.push(pair.clone());
        }
    }

    Ok(pending)
}

/// Syncs a single mirror pair.
fn sync_pair(repo: &Repository, config: &Config, pair: &MirrorPair) -> Result<SyncOutcome> {
    let workdir = workdir_of(repo)?;
    ensure_source_exists(&workdir, pair)?;

    let dest_abs = workdir.join(&pair.dest);

    let outcome = match collect_diff(repo, &pair.source)? {
        None => {
            if dest_abs.exists() {
                SyncOutcome::Unchanged
            } else {
                copy_source(&workdir, pair)?;
                SyncOutcome::Created
            }
        }
        Some(patch) => {
            if dest_abs.exists() {
                let retargeted = retarget_patch(&patch, &pair.source, &pair.dest);
                apply_patch(repo, &workdir, &retargeted, config.ignore_whitespace, pair)?
            } else {
                // Nothing to patch against; a full copy already carries the change.
                copy_source(&workdir, pair)?;
                SyncOutcome::Created
            }
        }
    };

    if config.auto_stage && outcome != SyncOutcome::Unchanged {
        stage_dest(repo, pair)?;
    }

    Ok(outcome)
}

/// Collects the patch for `source`, trying the same ladder as the original
/// workflow: staged changes, then the last commit, then the range since the
/// merge base with `origin/main` (falling back to `origin/master`).
///
/// Returns `None` when no rung produces a non-empty diff.
fn collect_diff(repo: &Repository, source: &str) -> Result<Option<String>> {
    if let Some(patch) = staged_diff(repo, source)? {
        return Ok(Some(patch));
    }
    if let Some(patch) = last_commit_diff(repo, source)? {
        return Ok(Some(patch));
    }
    merge_base_diff(repo, source)
}

/// Diff of HEAD against the index, limited to `source`.
fn staged_diff(repo: &Repository, source: &str) -> Result<Option<String>> {
    let head_tree = head_tree(repo)?;
    let mut opts = DiffOptions::new();
    opts.pathspec(source);
    let diff = repo.diff_tree_to_index(head_tree.as_ref(), None, Some(&mut opts))?;
    render_patch(&diff)
}

/// Diff introduced by the last commit, limited to `source`.
fn last_commit_diff(repo: &Repository, source: &str) -> Result<Option<String>> {
    let head = match repo.head() {
        Ok(head) => head.peel_to_commit()?,
        Err(_) => return Ok(None),
    };
    if head.parent_count() == 0 {
        return Ok(None);
    }

    let parent_tree = head.parent(0)?.tree()?;
    let head_tree = head.tree()?;
    let mut opts = DiffOptions::new();
    opts.pathspec(source);
    let diff = repo.diff_tree_to_tree(Some(&parent_tree), Some(&head_tree), Some(&mut opts))?;
    render_patch(&diff)
}

/// Diff since the merge base with the remote default branch, limited to
/// `source`. Tries `origin/main`, then `origin/master`.
fn merge_base_diff(repo: &Repository, source: &str) -> Result<Option<String>> {
    let head = match repo.head() {
        Ok(head) => head.peel_to_commit()?,
        Err(_) => return Ok(None),
    };

    for branch in ["origin/main", "origin/master"] {
        let reference = match repo.find_reference(&format!("refs/remotes/{}", branch)) {
            Ok(reference) => reference,
            Err(_) => continue,
        };
        let upstream = reference.peel_to_commit()?;
        let base = match repo.merge_base(head.id(), upstream.id()) {
            Ok(base) => base,
            Err(_) => continue,
        };

        let base_tree = repo.find_commit(base)?.tree()?;
        let head_tree = head.tree()?;
        let mut opts = DiffOptions::new();
        opts.pathspec(source);
        let diff =
            repo.diff_tree_to_tree(Some(&base_tree), Some(&head_tree), Some(&mut opts))?;
        if let Some(patch) = render_patch(&diff)? {
            return Ok(Some(patch));
        }
    }

    Ok(None)
}

/// Renders a diff to patch text; `None` when the diff is empty.
fn render_patch(diff: &Diff) -> Result<Option<String>> {
    if diff.deltas().len() == 0 {
        return Ok(None);
    }

    let mut buf = Vec::new();
    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        match line.origin() {
            '+' | '-' | ' ' => buf.push(line.origin() as u8),
            _ => {}
        }
        buf.extend_from_slice(line.content());
        true
    })?;

    if buf.is_empty() {
        return Ok(None);
    }

    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

/// Rewrites the patch so its target is the mirror path instead of the source.
///
/// Patch headers carry repository-relative paths with forward slashes, which
/// is exactly how mirror pairs are configured. Only header lines are
/// rewritten; hunk content that happens to mention the source path must pass
/// through untouched or the patch body would be corrupted.
fn retarget_patch(patch: &str, source: &str, dest: &str) -> String {
    let mut out = String::with_capacity(patch.len());
    let mut in_headers = true;

    for line in patch.split_inclusive('\n') {
        if line.starts_with("diff --git ") {
            in_headers = true;
        }

        let is_path_header = in_headers
            && (line.starts_with("diff --git ")
                || line.starts_with("--- ")
                || line.starts_with("+++ "));
        if is_path_header {
            out.push_str(&line.replace(source, dest));
        } else {
            out.push_str(line);
        }

        // Hunk headers end the per-file header block.
        if line.starts_with("@@") {
            in_headers = false;
        }
    }

    out
}

/// Applies a retargeted patch to the working tree, natively first, then via
/// `git apply --3way` as a fallback.
fn apply_patch(
    repo: &Repository,
    workdir: &Path,
    patch: &str,
    ignore_whitespace: bool,
    pair: &MirrorPair,
) -> Result<SyncOutcome> {
    let diff = Diff::from_buffer(patch.as_bytes())?;
    match repo.apply(&diff, ApplyLocation::WorkDir, None) {
        Ok(()) => Ok(SyncOutcome::Patched),
        Err(_) => {
            apply_patch_three_way(workdir, patch, ignore_whitespace, pair)?;
            Ok(SyncOutcome::PatchedThreeWay)
        }
    }
}

/// Fallback path: `git apply --3way` with the patch on stdin. libgit2 has no
/// three-way apply, so this shells out like the original workflow did.
fn apply_patch_three_way(
    workdir: &Path,
    patch: &str,
    ignore_whitespace: bool,
    pair: &MirrorPair,
) -> Result<()> {
    let mut command = Command::new("git");
    command.arg("apply").arg("--3way");
    if ignore_whitespace {
        command.arg("--ignore-whitespace");
    }
    command
        .arg("-")
        .current_dir(workdir)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped());

    let mut child = command.spawn()?;
    child
        .stdin
        .take()
        .ok_or_else(|| Error::PatchFailed {
            dest: workdir.join(&pair.dest),
            reason: "could not open git apply stdin".to_string(),
        })?
        .write_all(patch.as_bytes())?;

    let output = child.wait_with_output()?;
    if !output.status.success() {
        return Err(Error::PatchFailed {
            dest: workdir.join(&pair.dest),
            reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(())
}

/// Creates the mirror as a verbatim copy of the source.
fn copy_source(workdir: &Path, pair: &MirrorPair) -> Result<()> {
    let source = workdir.join(&pair.source);
    let dest = workdir.join(&pair.dest);
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::copy(&source, &dest)?;
    Ok(())
}

/// Stages the mirror path into the index.
fn stage_dest(repo: &Repository, pair: &MirrorPair) -> Result<()> {
    let mut index = repo.index()?;
    index.add_path(Path::new(&pair.dest))?;
    index.write()?;
    Ok(())
}

fn workdir_of(repo: &Repository) -> Result<PathBuf> {
    repo.workdir()
        .map(Path::to_path_buf)
        .ok_or_else(|| Error::Git(git2::Error::from_str("bare repository has no working tree")))
}

fn ensure_source_exists(workdir: &Path, pair: &MirrorPair) -> Result<()> {
    let source = workdir.join(&pair.source);
    if !source.exists() {
        return Err(Error::SourceMissing(source));
    }
    Ok(())
}

fn head_tree(repo: &Repository) -> Result<Option<Tree<'_>>> {
    match repo.head() {
        Ok(head) => Ok(Some(head.peel_to_tree()?)),
        Err(_) => Ok(None),
    }
}
