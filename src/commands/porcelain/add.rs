use crate::areas::repository::Repository;
use crate::areas::workspace::IgnoreRules;
use crate::artifacts::index::staged_entry::{ChangeKind, StagedEntry};
use crate::artifacts::status::inspector::Inspector;
use colored::Colorize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const ALL_PATHS: &str = ".";

impl Repository {
    /// Stage the qualifying changes under `paths`, or every change when `all` is set
    /// or `.` is among the paths.
    pub async fn add(&mut self, paths: &[String], all: bool) -> anyhow::Result<()> {
        let index = self.index();
        let mut index = index.lock().await;

        // Load the staging file from the disk
        index.rehydrate()?;

        let rules = self.workspace().ignore_rules()?;
        let revision = self.working_version()?;
        let inspector = Arc::new(self.working_status().inspector(revision.as_ref()));
        let snapshot_files = match &revision {
            Some(revision) => self
                .database()
                .list_files(revision.snapshot_id(), &rules)?,
            None => Vec::new(),
        };

        let mut found = Vec::new();
        let mut not_found = Vec::new();

        let candidates = if all || paths.iter().any(|path| path == ALL_PATHS) {
            self.working_status()
                .initialize(&rules)
                .await?
                .changes()
                .cloned()
                .collect::<Vec<_>>()
        } else {
            let mut candidates = Vec::new();
            for path in paths {
                let (entries, exists) = self
                    .expand_path(path, &rules, &inspector, &snapshot_files)
                    .await?;
                if exists {
                    found.push(path.as_str());
                } else {
                    not_found.push(path.as_str());
                }
                candidates.extend(entries);
            }
            candidates
        };

        index.append(&candidates)?;
        index.rehydrate()?;
        index.retain(|entry| inspector.still_qualifies(entry));
        index.write_updates()?;

        if !not_found.is_empty() {
            for path in found {
                writeln!(self.writer(), "staged '{}'", path)?;
            }
            for path in not_found {
                eprintln!(
                    "{} pathspec '{}' did not match any files",
                    "warning:".yellow().bold(),
                    path
                );
            }
        }

        Ok(())
    }

    /// Candidate entries for one user supplied path and whether the path was found.
    ///
    /// A path unknown to both the working directory and the checked-out snapshot is
    /// tentatively tagged untracked; re-validation drops it.
    async fn expand_path(
        &self,
        user_path: &str,
        rules: &IgnoreRules,
        inspector: &Arc<Inspector>,
        snapshot_files: &[PathBuf],
    ) -> anyhow::Result<(Vec<StagedEntry>, bool)> {
        let Ok(rel_path) = self.workspace().relativize(Path::new(user_path)) else {
            return Ok((Vec::new(), false));
        };

        let root = self.workspace().path();
        let absolute = root.join(&rel_path);
        if !rel_path.as_os_str().is_empty() && rules.is_ignored(&rel_path, absolute.is_dir()) {
            return Ok((Vec::new(), false));
        }

        if absolute.exists() {
            let mut entries = inspector
                .clone()
                .scan(self.workspace().list_under(&rel_path, rules)?)
                .await?;
            entries.extend(deleted_under(root, &rel_path, rules, snapshot_files));

            return Ok((entries, true));
        }

        let deleted = deleted_under(root, &rel_path, rules, snapshot_files);
        if !deleted.is_empty() {
            return Ok((deleted, true));
        }

        Ok((vec![StagedEntry::new(ChangeKind::Untracked, rel_path)], false))
    }
}

/// Deletions of snapshot files at or below `rel_path` that are gone from the working
/// directory.
fn deleted_under(
    root: &Path,
    rel_path: &Path,
    rules: &IgnoreRules,
    snapshot_files: &[PathBuf],
) -> Vec<StagedEntry> {
    snapshot_files
        .iter()
        .filter(|path| path.starts_with(rel_path))
        .filter(|path| !rules.is_ignored(path, false))
        .filter(|path| !root.join(path).exists())
        .map(|path| StagedEntry::new(ChangeKind::Deleted, path.clone()))
        .collect()
}
