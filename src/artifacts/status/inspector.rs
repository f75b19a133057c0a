use crate::artifacts::index::staged_entry::{ChangeKind, StagedEntry};
use crate::artifacts::status::file_change::Classification;
use anyhow::Context;
use derive_new::new;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;

/// Compares working files with the store of the checked-out snapshot.
///
/// Owns its paths so that it can be shared with blocking classification tasks.
#[derive(Debug, Clone, new)]
pub struct Inspector {
    workspace_root: PathBuf,
    /// `None` before the first commit: every file is untracked
    snapshot_store: Option<PathBuf>,
}

impl Inspector {
    /// Classify a path relative to the root; the path must exist in the working directory.
    pub fn classify(&self, rel_path: &Path) -> anyhow::Result<Classification> {
        let working_path = self.workspace_root.join(rel_path);
        if !working_path.exists() {
            anyhow::bail!(
                "cannot classify '{}': not found in the working directory",
                rel_path.display()
            );
        }

        let snapshot_path = match &self.snapshot_store {
            Some(store) => store.join(rel_path),
            None => return Ok(Classification::Untracked),
        };
        if !snapshot_path.is_file() {
            return Ok(Classification::Untracked);
        }

        let working = std::fs::read(&working_path)
            .with_context(|| format!("failed to read {}", working_path.display()))?;
        let committed = std::fs::read(&snapshot_path)
            .with_context(|| format!("failed to read {}", snapshot_path.display()))?;

        if working == committed {
            Ok(Classification::Unchanged)
        } else {
            Ok(Classification::Modified)
        }
    }

    pub fn is_in_snapshot(&self, rel_path: &Path) -> bool {
        self.snapshot_store
            .as_ref()
            .is_some_and(|store| store.join(rel_path).is_file())
    }

    /// Paths of the snapshot listing missing from the working listing.
    pub fn find_deleted(working: &BTreeSet<PathBuf>, snapshot: &[PathBuf]) -> Vec<PathBuf> {
        snapshot
            .iter()
            .filter(|path| !working.contains(*path))
            .cloned()
            .collect()
    }

    /// Whether a staged entry still describes the current state of its path.
    pub fn still_qualifies(&self, entry: &StagedEntry) -> bool {
        let present = self.workspace_root.join(entry.path()).is_file();

        match entry.kind {
            ChangeKind::Deleted => !present && self.is_in_snapshot(entry.path()),
            kind => {
                present
                    && self
                        .classify(entry.path())
                        .is_ok_and(|classification| classification.staged_kind() == Some(kind))
            }
        }
    }

    /// Classify every path on the blocking pool and return the qualifying changes,
    /// sorted.
    pub async fn scan(self: Arc<Self>, paths: Vec<PathBuf>) -> anyhow::Result<Vec<StagedEntry>> {
        let mut tasks = JoinSet::new();

        for path in paths {
            let inspector = self.clone();
            tasks.spawn_blocking(move || -> anyhow::Result<Option<StagedEntry>> {
                let classification = inspector.classify(&path)?;
                Ok(classification
                    .staged_kind()
                    .map(|kind| StagedEntry::new(kind, path)))
            });
        }

        let mut changes = Vec::new();
        while let Some(result) = tasks.join_next().await {
            if let Some(entry) = result?? {
                changes.push(entry);
            }
        }
        changes.sort();

        Ok(changes)
    }
}
