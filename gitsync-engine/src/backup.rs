//! Rename-based backup of a repository working copy.
//!
//! A replace-style sync moves the existing working copy aside before
//! re-materializing it, so the previous good state survives any failure.
//! The backup is a sibling directory named `<dir>-backup`; at most one
//! generation is ever kept.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::{io_err, EngineError};

/// Suffix appended to a working-copy directory name to form its backup
/// sibling.
pub const BACKUP_SUFFIX: &str = "-backup";

/// Joint existence state of a working copy and its backup sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupState {
    /// Nothing on disk yet.
    Neither,
    /// Only the working copy exists — the common steady state.
    RepoOnly,
    /// Only the backup exists — an earlier replace failed after
    /// snapshotting.
    BackupOnly,
    /// Both exist — an earlier run left a stale backup behind.
    Both,
}

/// The backup sibling path for `path`.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(BACKUP_SUFFIX);
    path.with_file_name(name)
}

/// Classify the joint state of `path` and its backup sibling.
pub fn classify(path: &Path) -> BackupState {
    match (path.exists(), backup_path(path).exists()) {
        (false, false) => BackupState::Neither,
        (true, false) => BackupState::RepoOnly,
        (false, true) => BackupState::BackupOnly,
        (true, true) => BackupState::Both,
    }
}

/// Move the working copy at `path` aside and return the backup path.
///
/// A stale backup at the sibling path is deleted first, so after this call
/// the backup is the one generation taken now. The rename is atomic at the
/// filesystem level, but the window between deleting a stale backup and
/// completing the fresh rename is not crash-safe: a crash there leaves no
/// backup at all. Known gap, accepted.
pub async fn take_backup(path: &Path) -> Result<PathBuf, EngineError> {
    let backup = backup_path(path);
    if backup.exists() {
        fs::remove_dir_all(&backup)
            .await
            .map_err(|e| io_err(&backup, e))?;
    }
    fs::rename(path, &backup)
        .await
        .map_err(|e| io_err(path, e))?;
    Ok(backup)
}

/// Delete the backup once the new copy has materialized correctly.
pub async fn drop_backup(backup: &Path) -> Result<(), EngineError> {
    fs::remove_dir_all(backup)
        .await
        .map_err(|e| io_err(backup, e))
}

/// Delete a partially-created working copy after a failed
/// re-materialization, leaving the backup sibling (if any) as the effective
/// current state.
///
/// The earlier rename is *not* reversed: the backup directory itself remains
/// the durable artifact until a later run treats the pair specially again.
pub async fn drop_failed(path: &Path) -> Result<(), EngineError> {
    if path.exists() {
        fs::remove_dir_all(path)
            .await
            .map_err(|e| io_err(path, e))?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    fn repo_dir(root: &TempDir) -> PathBuf {
        root.path().join("acme").join("api")
    }

    fn make_copy(path: &Path, marker: &str) {
        std::fs::create_dir_all(path).expect("create dir");
        std::fs::write(path.join("marker.txt"), marker).expect("write marker");
    }

    #[test]
    fn backup_path_appends_the_suffix() {
        assert_eq!(
            backup_path(Path::new("/mirror/acme/api")),
            PathBuf::from("/mirror/acme/api-backup")
        );
    }

    #[rstest]
    #[case(false, false, BackupState::Neither)]
    #[case(true, false, BackupState::RepoOnly)]
    #[case(false, true, BackupState::BackupOnly)]
    #[case(true, true, BackupState::Both)]
    fn classify_covers_every_state(
        #[case] repo: bool,
        #[case] backup: bool,
        #[case] expected: BackupState,
    ) {
        let root = TempDir::new().expect("tempdir");
        let path = repo_dir(&root);
        if repo {
            std::fs::create_dir_all(&path).expect("create repo");
        }
        if backup {
            std::fs::create_dir_all(backup_path(&path)).expect("create backup");
        }
        assert_eq!(classify(&path), expected);
    }

    #[tokio::test]
    async fn take_backup_moves_the_working_copy_aside() {
        let root = TempDir::new().expect("tempdir");
        let path = repo_dir(&root);
        make_copy(&path, "previous");

        let backup = take_backup(&path).await.expect("take backup");

        assert!(!path.exists());
        assert_eq!(backup, backup_path(&path));
        let marker = std::fs::read_to_string(backup.join("marker.txt")).expect("marker");
        assert_eq!(marker, "previous");
    }

    #[tokio::test]
    async fn take_backup_replaces_a_stale_backup() {
        let root = TempDir::new().expect("tempdir");
        let path = repo_dir(&root);
        make_copy(&path, "current");
        make_copy(&backup_path(&path), "stale");

        let backup = take_backup(&path).await.expect("take backup");

        let marker = std::fs::read_to_string(backup.join("marker.txt")).expect("marker");
        assert_eq!(marker, "current");
        assert_eq!(classify(&path), BackupState::BackupOnly);
    }

    #[tokio::test]
    async fn take_backup_without_a_working_copy_errors() {
        let root = TempDir::new().expect("tempdir");
        let path = repo_dir(&root);
        let err = take_backup(&path).await.expect_err("no working copy");
        assert!(matches!(err, EngineError::Io { .. }));
    }

    #[tokio::test]
    async fn drop_backup_removes_the_sibling() {
        let root = TempDir::new().expect("tempdir");
        let path = repo_dir(&root);
        make_copy(&backup_path(&path), "old");

        drop_backup(&backup_path(&path)).await.expect("drop");

        assert_eq!(classify(&path), BackupState::Neither);
    }

    #[tokio::test]
    async fn drop_failed_removes_only_the_new_copy() {
        let root = TempDir::new().expect("tempdir");
        let path = repo_dir(&root);
        make_copy(&path, "partial");
        make_copy(&backup_path(&path), "good");

        drop_failed(&path).await.expect("drop failed copy");

        assert_eq!(classify(&path), BackupState::BackupOnly);
        let marker =
            std::fs::read_to_string(backup_path(&path).join("marker.txt")).expect("marker");
        assert_eq!(marker, "good");
    }

    #[tokio::test]
    async fn drop_failed_tolerates_an_absent_path() {
        let root = TempDir::new().expect("tempdir");
        drop_failed(&repo_dir(&root)).await.expect("no-op");
    }
}
