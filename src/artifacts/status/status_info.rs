use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::areas::workspace::IgnoreRules;
use crate::artifacts::index::staged_entry::{ChangeKind, StagedEntry};
use crate::artifacts::snapshot::revision::Revision;
use crate::artifacts::status::inspector::Inspector;
use derive_new::new;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Working directory state relative to the checked-out snapshot.
#[derive(Debug, Clone, Default)]
pub struct StatusInfo {
    /// Every qualifying change: `U`/`M` for working files, `D` for deleted ones
    pub(crate) changes: BTreeSet<StagedEntry>,
}

impl StatusInfo {
    pub fn changes(&self) -> impl Iterator<Item = &StagedEntry> {
        self.changes.iter()
    }

    /// Split the changes into (staged, unstaged, untracked) against the index.
    pub fn partition(
        &self,
        index: &Index,
    ) -> (Vec<StagedEntry>, Vec<StagedEntry>, Vec<StagedEntry>) {
        let (staged, pending): (Vec<_>, Vec<_>) = self
            .changes
            .iter()
            .cloned()
            .partition(|change| index.contains(change));
        let (untracked, unstaged) = pending
            .into_iter()
            .partition(|change| change.kind == ChangeKind::Untracked);

        (staged, unstaged, untracked)
    }
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    pub fn inspector(&self, revision: Option<&Revision>) -> Inspector {
        Inspector::new(
            self.repository.workspace().path().to_path_buf(),
            revision.map(|revision| {
                self.repository
                    .database()
                    .store_path(revision.snapshot_id())
            }),
        )
    }

    pub async fn initialize(&self, rules: &IgnoreRules) -> anyhow::Result<StatusInfo> {
        let revision = self.repository.working_version()?;
        let working_files = self.repository.workspace().list_files(rules)?;
        let snapshot_files = match &revision {
            Some(revision) => self
                .repository
                .database()
                .list_files(revision.snapshot_id(), rules)?,
            None => Vec::new(),
        };

        let inspector = Arc::new(self.inspector(revision.as_ref()));
        let mut changes = inspector
            .scan(working_files.clone())
            .await?
            .into_iter()
            .collect::<BTreeSet<_>>();

        let working_files = working_files.into_iter().collect::<BTreeSet<_>>();
        changes.extend(
            Inspector::find_deleted(&working_files, &snapshot_files)
                .into_iter()
                .map(|path| StagedEntry::new(ChangeKind::Deleted, path)),
        );

        Ok(StatusInfo { changes })
    }
}
