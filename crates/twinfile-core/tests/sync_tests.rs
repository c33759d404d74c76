// Rust guideline compliant 2026-02-12

//! Unit tests for the mirror-sync engine.

use git2::Repository;
use std::path::Path;
use tempfile::TempDir;
use twinfile_core::{pending_pairs, sync_repo, Config, MirrorPair, SyncOutcome};

fn init_repo(path: &Path) -> Repository {
    let repo = Repository::init(path).expect("Failed to init repo");
    {
        let mut config = repo.config().expect("Failed to open repo config");
        config.set_str("user.name", "tester").expect("set user.name");
        config
            .set_str("user.email", "tester@example.com")
            .expect("set user.email");
    }
    repo
}

fn commit_all(repo: &Repository, message: &str) {
    let mut index = repo.index().expect("Failed to open index");
    index
        .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
        .expect("Failed to add files");
    index.write().expect("Failed to write index");
    let tree_id = index.write_tree().expect("Failed to write tree");
    let tree = repo.find_tree(tree_id).expect("Failed to find tree");
    let sig = repo.signature().expect("Failed to build signature");
    let parent = repo.head().ok().map(|h| h.peel_to_commit().expect("commit"));
    let parents: Vec<&git2::Commit> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .expect("Failed to commit");
}

fn stage(repo: &Repository, path: &str) {
    let mut index = repo.index().expect("Failed to open index");
    index.add_path(Path::new(path)).expect("Failed to stage");
    index.write().expect("Failed to write index");
}

fn mirror_config() -> Config {
    let mut config = Config::default();
    config.mirrors.push(MirrorPair {
        source: "src.txt".to_string(),
        dest: "copies/src.txt".to_string(),
    });
    config
}

/// Repo where source and mirror exist, identical, and are committed.
fn seeded_repo() -> (TempDir, Repository) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let repo = init_repo(temp_dir.path());

    std::fs::write(temp_dir.path().join("src.txt"), "line1\nline2\nline3\n")
        .expect("Failed to write source");
    std::fs::create_dir_all(temp_dir.path().join("copies")).expect("Failed to create copies dir");
    std::fs::copy(
        temp_dir.path().join("src.txt"),
        temp_dir.path().join("copies/src.txt"),
    )
    .expect("Failed to seed mirror");
    commit_all(&repo, "seed");

    (temp_dir, repo)
}

#[test]
fn test_staged_change_is_patched_onto_mirror() {
    let (temp_dir, repo) = seeded_repo();

    std::fs::write(temp_dir.path().join("src.txt"), "line1\nchanged\nline3\n")
        .expect("Failed to modify source");
    stage(&repo, "src.txt");

    let reports = sync_repo(temp_dir.path(), &mirror_config()).expect("Sync failed");
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].outcome, SyncOutcome::Patched);

    let mirrored = std::fs::read_to_string(temp_dir.path().join("copies/src.txt"))
        .expect("Failed to read mirror");
    assert_eq!(mirrored, "line1\nchanged\nline3\n");
}

#[test]
fn test_last_commit_change_is_patched_when_nothing_staged() {
    let (temp_dir, repo) = seeded_repo();

    // Commit a source-only change, then restore the mirror to its old content
    // so the working tree lags the commit the way a CI checkout would.
    std::fs::write(temp_dir.path().join("src.txt"), "line1\nchanged\nline3\n")
        .expect("Failed to modify source");
    stage(&repo, "src.txt");
    commit_all(&repo, "change source");
    std::fs::write(
        temp_dir.path().join("copies/src.txt"),
        "line1\nline2\nline3\n",
    )
    .expect("Failed to reset mirror");

    let reports = sync_repo(temp_dir.path(), &mirror_config()).expect("Sync failed");
    assert_eq!(reports[0].outcome, SyncOutcome::Patched);

    let mirrored = std::fs::read_to_string(temp_dir.path().join("copies/src.txt"))
        .expect("Failed to read mirror");
    assert_eq!(mirrored, "line1\nchanged\nline3\n");
}

#[test]
fn test_missing_mirror_is_created_as_copy() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let repo = init_repo(temp_dir.path());
    std::fs::write(temp_dir.path().join("src.txt"), "content\n").expect("Failed to write source");
    commit_all(&repo, "seed");

    let reports = sync_repo(temp_dir.path(), &mirror_config()).expect("Sync failed");
    assert_eq!(reports[0].outcome, SyncOutcome::Created);

    let mirrored = std::fs::read_to_string(temp_dir.path().join("copies/src.txt"))
        .expect("Failed to read mirror");
    assert_eq!(mirrored, "content\n");
}

#[test]
fn test_clean_repo_reports_unchanged() {
    let (temp_dir, _repo) = seeded_repo();

    let reports = sync_repo(temp_dir.path(), &mirror_config()).expect("Sync failed");
    assert_eq!(reports[0].outcome, SyncOutcome::Unchanged);

    let mirrored = std::fs::read_to_string(temp_dir.path().join("copies/src.txt"))
        .expect("Failed to read mirror");
    assert_eq!(mirrored, "line1\nline2\nline3\n", "Mirror should be untouched");
}

#[test]
fn test_synced_mirror_is_staged() {
    let (temp_dir, repo) = seeded_repo();

    std::fs::write(temp_dir.path().join("src.txt"), "line1\nchanged\nline3\n")
        .expect("Failed to modify source");
    stage(&repo, "src.txt");

    sync_repo(temp_dir.path(), &mirror_config()).expect("Sync failed");

    let index = repo.index().expect("Failed to open index");
    let entry = index
        .get_path(Path::new("copies/src.txt"), 0)
        .expect("Mirror should be staged");
    let staged_blob = repo.find_blob(entry.id).expect("Failed to read staged blob");
    assert_eq!(staged_blob.content(), b"line1\nchanged\nline3\n");
}

#[test]
fn test_auto_stage_disabled_leaves_index_alone() {
    let (temp_dir, repo) = seeded_repo();

    std::fs::write(temp_dir.path().join("src.txt"), "line1\nchanged\nline3\n")
        .expect("Failed to modify source");
    stage(&repo, "src.txt");
    let before = repo
        .index()
        .expect("index")
        .get_path(Path::new("copies/src.txt"), 0)
        .expect("seeded mirror is tracked")
        .id;

    let mut config = mirror_config();
    config.auto_stage = false;
    sync_repo(temp_dir.path(), &config).expect("Sync failed");

    let after = repo
        .index()
        .expect("index")
        .get_path(Path::new("copies/src.txt"), 0)
        .expect("entry")
        .id;
    assert_eq!(before, after, "Index entry should not change");
}

#[test]
fn test_missing_source_is_an_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    init_repo(temp_dir.path());

    let result = sync_repo(temp_dir.path(), &mirror_config());
    assert!(result.is_err(), "Missing source should fail the sync");
}

#[test]
fn test_merge_base_rung_patches_when_local_rungs_are_empty() {
    let (temp_dir, repo) = seeded_repo();
    let base_id = repo
        .head()
        .expect("head")
        .peel_to_commit()
        .expect("commit")
        .id();
    repo.reference("refs/remotes/origin/main", base_id, true, "track remote")
        .expect("Failed to create remote ref");

    // The source change lands in one commit with an unrelated commit on top,
    // so neither the index nor the last commit carries the source diff and
    // only the merge-base rung can find it.
    std::fs::write(temp_dir.path().join("src.txt"), "line1\nchanged\nline3\n")
        .expect("Failed to modify source");
    stage(&repo, "src.txt");
    commit_all(&repo, "change source");
    std::fs::write(temp_dir.path().join("other.txt"), "unrelated\n")
        .expect("Failed to write unrelated file");
    commit_all(&repo, "unrelated change");

    let reports = sync_repo(temp_dir.path(), &mirror_config()).expect("Sync failed");
    assert_eq!(reports[0].outcome, SyncOutcome::Patched);

    let mirrored = std::fs::read_to_string(temp_dir.path().join("copies/src.txt"))
        .expect("Failed to read mirror");
    assert_eq!(mirrored, "line1\nchanged\nline3\n");
}

#[test]
fn test_merge_base_rung_falls_back_to_origin_master() {
    let (temp_dir, repo) = seeded_repo();
    let base_id = repo
        .head()
        .expect("head")
        .peel_to_commit()
        .expect("commit")
        .id();
    repo.reference("refs/remotes/origin/master", base_id, true, "track remote")
        .expect("Failed to create remote ref");

    std::fs::write(temp_dir.path().join("src.txt"), "line1\nchanged\nline3\n")
        .expect("Failed to modify source");
    stage(&repo, "src.txt");
    commit_all(&repo, "change source");
    std::fs::write(temp_dir.path().join("other.txt"), "unrelated\n")
        .expect("Failed to write unrelated file");
    commit_all(&repo, "unrelated change");

    let reports = sync_repo(temp_dir.path(), &mirror_config()).expect("Sync failed");
    assert_eq!(reports[0].outcome, SyncOutcome::Patched);

    let mirrored = std::fs::read_to_string(temp_dir.path().join("copies/src.txt"))
        .expect("Failed to read mirror");
    assert_eq!(mirrored, "line1\nchanged\nline3\n");
}

#[test]
fn test_drifted_mirror_falls_back_to_three_way_merge() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let repo = init_repo(temp_dir.path());

    let base = "alpha\nbravo\ncharlie\ndelta\necho\nfoxtrot\ngolf\nhotel\nindia\njuliett\nkilo\nlima\n";
    std::fs::write(temp_dir.path().join("src.txt"), base).expect("Failed to write source");
    std::fs::create_dir(temp_dir.path().join("copies")).expect("Failed to create copies dir");
    std::fs::copy(
        temp_dir.path().join("src.txt"),
        temp_dir.path().join("copies/src.txt"),
    )
    .expect("Failed to seed mirror");
    commit_all(&repo, "seed");

    // Stage a change to the last line; its hunk context covers the three
    // lines above it.
    let changed = base.replace("lima", "lima updated");
    std::fs::write(temp_dir.path().join("src.txt"), &changed).expect("Failed to modify source");
    stage(&repo, "src.txt");

    // Drift the mirror inside that context window so the native apply cannot
    // match the preimage and the engine has to shell out to git apply --3way.
    let drifted = base.replace("india", "india drifted");
    std::fs::write(temp_dir.path().join("copies/src.txt"), &drifted)
        .expect("Failed to drift mirror");

    let reports = sync_repo(temp_dir.path(), &mirror_config()).expect("Sync failed");
    assert_eq!(reports[0].outcome, SyncOutcome::PatchedThreeWay);

    let mirrored = std::fs::read_to_string(temp_dir.path().join("copies/src.txt"))
        .expect("Failed to read mirror");
    assert!(
        mirrored.contains("india drifted"),
        "Mirror's own drift should survive the merge"
    );
    assert!(
        mirrored.contains("lima updated"),
        "Source change should reach the mirror"
    );
}

#[test]
fn test_patch_body_mentioning_source_path_is_not_rewritten() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let repo = init_repo(temp_dir.path());

    let base = "intro\nsee src.txt for details\n";
    std::fs::write(temp_dir.path().join("src.txt"), base).expect("Failed to write source");
    std::fs::create_dir(temp_dir.path().join("copies")).expect("Failed to create copies dir");
    std::fs::copy(
        temp_dir.path().join("src.txt"),
        temp_dir.path().join("copies/src.txt"),
    )
    .expect("Failed to seed mirror");
    commit_all(&repo, "seed");

    // Both the hunk context and the added line mention the source path; only
    // the patch headers may be retargeted at the mirror.
    std::fs::write(
        temp_dir.path().join("src.txt"),
        "intro\nsee src.txt for details\nread src.txt again\n",
    )
    .expect("Failed to modify source");
    stage(&repo, "src.txt");

    let reports = sync_repo(temp_dir.path(), &mirror_config()).expect("Sync failed");
    assert_eq!(reports[0].outcome, SyncOutcome::Patched);

    let mirrored = std::fs::read_to_string(temp_dir.path().join("copies/src.txt"))
        .expect("Failed to read mirror");
    assert_eq!(mirrored, "intro\nsee src.txt for details\nread src.txt again\n");
}

#[test]
fn test_pending_pairs_reflects_staged_changes() {
    let (temp_dir, repo) = seeded_repo();

    let pending = pending_pairs(temp_dir.path(), &mirror_config()).expect("pending failed");
    assert!(pending.is_empty(), "Clean repo should have nothing pending");

    std::fs::write(temp_dir.path().join("src.txt"), "line1\nchanged\nline3\n")
        .expect("Failed to modify source");
    stage(&repo, "src.txt");

    let pending = pending_pairs(temp_dir.path(), &mirror_config()).expect("pending failed");
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].source, "src.txt");
}
