//! Resolution of `diff` arguments into comparable content sources
//!
//! Each argument is tried, in order, as an alias of the checked-out snapshot, a
//! snapshot revision, a branch name (its tip) and finally a working file.

use crate::areas::repository::Repository;
use crate::areas::workspace::IgnoreRules;
use crate::artifacts::branch::REF_ALIASES;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::diff::patch::Patch;
use crate::artifacts::snapshot::revision::Revision;
use crate::artifacts::snapshot::snapshot_id::SnapshotId;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffTarget {
    Snapshot(Revision),
    /// A working file, relative to the repository root
    File(PathBuf),
}

impl DiffTarget {
    pub fn resolve(arg: &str, repository: &Repository) -> anyhow::Result<Self> {
        if REF_ALIASES.contains_key(arg) {
            return repository
                .working_version()?
                .map(DiffTarget::Snapshot)
                .ok_or_else(|| anyhow::anyhow!("'{}' does not point at a commit yet", arg));
        }

        if let Ok(revision) = Revision::try_parse(arg)
            && repository.database().exists(revision.snapshot_id())
        {
            return Ok(DiffTarget::Snapshot(revision));
        }

        if let Ok(name) = BranchName::try_parse(arg)
            && let Some(token) = repository.refs().read_mapper()?.token(&name).cloned()
        {
            return repository
                .refs()
                .tip(&token)?
                .map(DiffTarget::Snapshot)
                .ok_or_else(|| anyhow::anyhow!("branch '{}' has no commits yet", name));
        }

        if let Ok(rel_path) = repository.workspace().relativize(Path::new(arg))
            && repository.workspace().is_file(&rel_path)
        {
            return Ok(DiffTarget::File(rel_path));
        }

        Err(RepositoryError::UnknownTarget(arg.to_string()).into())
    }
}

/// One side of a comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffSource {
    Snapshot(SnapshotId),
    Workspace,
    /// Nothing committed yet
    Empty,
}

impl DiffSource {
    pub fn from_version(version: Option<&Revision>) -> Self {
        version
            .map(|revision| DiffSource::Snapshot(revision.snapshot_id().clone()))
            .unwrap_or(DiffSource::Empty)
    }

    pub fn read(&self, repository: &Repository, rel_path: &Path) -> anyhow::Result<Option<String>> {
        match self {
            DiffSource::Snapshot(id) => repository.database().read_file(id, rel_path),
            DiffSource::Workspace if repository.workspace().is_file(rel_path) => {
                repository.workspace().read_file(rel_path).map(Some)
            }
            DiffSource::Workspace | DiffSource::Empty => Ok(None),
        }
    }

    pub fn list(
        &self,
        repository: &Repository,
        rules: &IgnoreRules,
    ) -> anyhow::Result<Vec<PathBuf>> {
        match self {
            DiffSource::Snapshot(id) => repository.database().list_files(id, rules),
            DiffSource::Workspace => repository.workspace().list_files(rules),
            DiffSource::Empty => Ok(Vec::new()),
        }
    }
}

/// A pair of file versions to diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileComparison {
    pub old_source: DiffSource,
    pub old_path: PathBuf,
    pub new_source: DiffSource,
    pub new_path: PathBuf,
}

impl FileComparison {
    pub fn same_path(old_source: DiffSource, new_source: DiffSource, path: PathBuf) -> Self {
        FileComparison {
            old_source,
            old_path: path.clone(),
            new_source,
            new_path: path,
        }
    }

    pub fn patch(&self, repository: &Repository) -> anyhow::Result<Option<Patch>> {
        let old = self.old_source.read(repository, &self.old_path)?;
        let new = self.new_source.read(repository, &self.new_path)?;

        Ok(Patch::compute(
            &label(&self.old_path),
            old.as_deref(),
            &label(&self.new_path),
            new.as_deref(),
        ))
    }
}

/// Plan the comparisons for an `(old, new)` pair of targets, where a missing `old`
/// is the checked-out snapshot and a missing `new` is the working directory.
pub fn plan_comparisons(
    repository: &Repository,
    rules: &IgnoreRules,
    current: DiffSource,
    old: Option<DiffTarget>,
    new: Option<DiffTarget>,
) -> anyhow::Result<Vec<FileComparison>> {
    use DiffTarget::{File, Snapshot};

    let comparisons = match (old, new) {
        (None, None) => tree_comparisons(repository, rules, current, DiffSource::Workspace)?,
        (Some(Snapshot(revision)), None) => tree_comparisons(
            repository,
            rules,
            DiffSource::from_version(Some(&revision)),
            DiffSource::Workspace,
        )?,
        (Some(File(path)), None) => {
            vec![FileComparison::same_path(current, DiffSource::Workspace, path)]
        }
        (Some(Snapshot(a)), Some(Snapshot(b))) => tree_comparisons(
            repository,
            rules,
            DiffSource::from_version(Some(&a)),
            DiffSource::from_version(Some(&b)),
        )?,
        (Some(File(a)), Some(File(b))) => vec![FileComparison {
            old_source: DiffSource::Workspace,
            old_path: a,
            new_source: DiffSource::Workspace,
            new_path: b,
        }],
        (Some(Snapshot(revision)), Some(File(path))) => vec![FileComparison::same_path(
            DiffSource::from_version(Some(&revision)),
            DiffSource::Workspace,
            path,
        )],
        (Some(File(path)), Some(Snapshot(revision))) => vec![FileComparison::same_path(
            DiffSource::Workspace,
            DiffSource::from_version(Some(&revision)),
            path,
        )],
        (None, Some(_)) => anyhow::bail!("a diff target needs a source to compare against"),
    };

    Ok(comparisons)
}

fn tree_comparisons(
    repository: &Repository,
    rules: &IgnoreRules,
    old: DiffSource,
    new: DiffSource,
) -> anyhow::Result<Vec<FileComparison>> {
    let paths = old
        .list(repository, rules)?
        .into_iter()
        .chain(new.list(repository, rules)?)
        .collect::<BTreeSet<_>>();

    Ok(paths
        .into_iter()
        .map(|path| FileComparison::same_path(old.clone(), new.clone(), path))
        .collect())
}

fn label(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
