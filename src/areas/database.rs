//! Content store of immutable snapshots
//!
//! Each snapshot lives in `REPO/<id>/` with the full file tree under `store/` and the
//! commit message under `meta/MESSAGE`. A snapshot's `store/` is only written while
//! the snapshot is being built.

use crate::areas::workspace::{IgnoreRules, Workspace, copy_tree, list_tree, read_text};
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::index::staged_entry::{ChangeKind, StagedEntry};
use crate::artifacts::snapshot::snapshot_id::SnapshotId;
use anyhow::Context;
use chrono::{DateTime, Local};
use colored::Colorize;
use std::path::{Path, PathBuf};

const STORE_DIR: &str = "store";
const META_DIR: &str = "meta";
const MESSAGE_FILE: &str = "MESSAGE";

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

// TODO: copy unchanged files with hard links instead of full copies
impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn repo_path(&self) -> &Path {
        &self.path
    }

    pub fn snapshot_path(&self, id: &SnapshotId) -> PathBuf {
        self.path.join(id.as_ref())
    }

    pub fn store_path(&self, id: &SnapshotId) -> PathBuf {
        self.snapshot_path(id).join(STORE_DIR)
    }

    pub fn exists(&self, id: &SnapshotId) -> bool {
        self.store_path(id).is_dir()
    }

    /// Create an empty snapshot directory, seeded with a copy of `base`'s tree.
    pub fn create_snapshot(&self, base: Option<&SnapshotId>) -> anyhow::Result<SnapshotId> {
        if let Some(base) = base {
            self.ensure_exists(base)?;
        }

        let id = loop {
            let candidate = SnapshotId::generate();
            if !self.snapshot_path(&candidate).exists() {
                break candidate;
            }
        };

        let store = self.store_path(&id);
        std::fs::create_dir_all(&store)
            .with_context(|| format!("failed to create snapshot store {}", store.display()))?;
        std::fs::create_dir_all(self.snapshot_path(&id).join(META_DIR))?;

        if let Some(base) = base {
            copy_tree(&self.store_path(base), &store, None)
                .with_context(|| format!("failed to seed snapshot {} from {}", id, base))?;
        }

        Ok(id)
    }

    /// Build a complete snapshot: seed from `base`, apply the staged changes read from
    /// the working directory, then record the message.
    pub fn write_snapshot(
        &self,
        base: Option<&SnapshotId>,
        staged: &[StagedEntry],
        message: &str,
        workspace: &Workspace,
    ) -> anyhow::Result<SnapshotId> {
        let id = self.create_snapshot(base)?;

        for entry in staged {
            self.apply_entry(&id, entry, workspace)?;
        }

        self.write_message(&id, message)?;

        Ok(id)
    }

    fn apply_entry(
        &self,
        id: &SnapshotId,
        entry: &StagedEntry,
        workspace: &Workspace,
    ) -> anyhow::Result<()> {
        let target = self.store_path(id).join(entry.path());

        match entry.kind {
            ChangeKind::Untracked | ChangeKind::Modified => {
                let source = workspace.path().join(entry.path());
                let metadata = std::fs::symlink_metadata(&source).with_context(|| {
                    format!(
                        "staged file '{}' is missing from the working directory",
                        entry.path().display()
                    )
                })?;

                if !metadata.is_file() {
                    eprintln!(
                        "{} skipping '{}': not a regular file",
                        "warning:".yellow().bold(),
                        entry.path().display()
                    );
                    return Ok(());
                }

                if let Some(parent) = target.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::copy(&source, &target).with_context(|| {
                    format!("failed to store '{}'", entry.path().display())
                })?;
            }
            ChangeKind::Deleted => remove_path(&target)?,
        }

        Ok(())
    }

    pub fn write_message(&self, id: &SnapshotId, message: &str) -> anyhow::Result<()> {
        let path = self.snapshot_path(id).join(META_DIR).join(MESSAGE_FILE);

        std::fs::write(&path, message)
            .with_context(|| format!("failed to write commit message of {}", id))
    }

    pub fn message(&self, id: &SnapshotId) -> anyhow::Result<String> {
        let path = self.snapshot_path(id).join(META_DIR).join(MESSAGE_FILE);

        Ok(read_text(&path)?.trim().to_string())
    }

    /// Creation time of the snapshot directory, falling back to its modification time
    /// on filesystems without birth times.
    pub fn created_at(&self, id: &SnapshotId) -> anyhow::Result<DateTime<Local>> {
        let metadata = std::fs::metadata(self.snapshot_path(id))
            .with_context(|| format!("snapshot {} not found", id))?;
        let time = metadata.created().or_else(|_| metadata.modified())?;

        Ok(DateTime::<Local>::from(time))
    }

    /// Content of `rel_path` inside the snapshot, `None` when the snapshot lacks it.
    pub fn read_file(&self, id: &SnapshotId, rel_path: &Path) -> anyhow::Result<Option<String>> {
        let path = self.store_path(id).join(rel_path);

        if path.is_file() {
            Ok(Some(read_text(&path)?))
        } else {
            Ok(None)
        }
    }

    /// Raw bytes of `rel_path` inside the snapshot, `None` when the snapshot lacks it.
    pub fn read_bytes(&self, id: &SnapshotId, rel_path: &Path) -> anyhow::Result<Option<Vec<u8>>> {
        let path = self.store_path(id).join(rel_path);

        if path.is_file() {
            let bytes = std::fs::read(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok(Some(bytes))
        } else {
            Ok(None)
        }
    }

    pub fn write_file(
        &self,
        id: &SnapshotId,
        rel_path: &Path,
        content: impl AsRef<[u8]>,
    ) -> anyhow::Result<()> {
        let path = self.store_path(id).join(rel_path);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, content)
            .with_context(|| format!("failed to write '{}' into {}", rel_path.display(), id))
    }

    pub fn remove_file(&self, id: &SnapshotId, rel_path: &Path) -> anyhow::Result<()> {
        remove_path(&self.store_path(id).join(rel_path))
    }

    pub fn list_files(&self, id: &SnapshotId, rules: &IgnoreRules) -> anyhow::Result<Vec<PathBuf>> {
        self.ensure_exists(id)?;

        list_tree(&self.store_path(id), rules)
    }

    /// Drop a snapshot's repository directory; used to discard a failed merge attempt.
    pub fn remove_snapshot(&self, id: &SnapshotId) -> anyhow::Result<()> {
        let path = self.snapshot_path(id);

        std::fs::remove_dir_all(&path)
            .with_context(|| format!("failed to remove snapshot {}", id))
    }

    fn ensure_exists(&self, id: &SnapshotId) -> anyhow::Result<()> {
        if self.exists(id) {
            Ok(())
        } else {
            Err(RepositoryError::Corrupted(format!("snapshot {} is missing from the store", id)).into())
        }
    }
}

fn remove_path(path: &Path) -> anyhow::Result<()> {
    match std::fs::symlink_metadata(path) {
        Ok(metadata) if metadata.is_dir() => std::fs::remove_dir_all(path)
            .with_context(|| format!("failed to remove directory {}", path.display())),
        Ok(_) => std::fs::remove_file(path)
            .with_context(|| format!("failed to remove {}", path.display())),
        Err(_) => Ok(()),
    }
}
