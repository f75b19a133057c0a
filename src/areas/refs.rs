//! Branch ledger, active branch marker and HEAD
//!
//! ## Layout
//!
//! - `HEAD`: `<branchToken>@<revision>` (revision empty before the first commit)
//! - `BRANCH/ACTIVE`: token of the checked-out branch
//! - `BRANCH/MAPPER.json`: `[token, name]` pairs
//! - `BRANCH/<token>/ACTIVITY`: revisions of the branch, tip first
//!
//! Every write takes an exclusive lock on the file it rewrites. Missing or unreadable
//! ledger files are reported as repository corruption.

use crate::artifacts::branch::branch_map::{BranchMap, BranchToken};
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::snapshot::head::Head;
use crate::artifacts::snapshot::revision::Revision;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::{Path, PathBuf};

pub const HEAD_FILE: &str = "HEAD";
pub const BRANCH_DIR: &str = "BRANCH";
pub const ACTIVE_FILE: &str = "ACTIVE";
pub const MAPPER_FILE: &str = "MAPPER.json";
pub const ACTIVITY_FILE: &str = "ACTIVITY";

/// Branch ledger rooted at the metadata directory (typically `.mygit`)
#[derive(Debug, new)]
pub struct Refs {
    path: Box<Path>,
}

/// A branch as shown by `branch list`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchListing {
    pub name: BranchName,
    pub token: BranchToken,
    pub active: bool,
}

impl Refs {
    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_FILE)
    }

    pub fn branches_path(&self) -> PathBuf {
        self.path.join(BRANCH_DIR)
    }

    fn active_path(&self) -> PathBuf {
        self.branches_path().join(ACTIVE_FILE)
    }

    fn mapper_path(&self) -> PathBuf {
        self.branches_path().join(MAPPER_FILE)
    }

    fn activity_path(&self, token: &BranchToken) -> PathBuf {
        self.branches_path().join(token.as_ref()).join(ACTIVITY_FILE)
    }

    /// Lay out an empty ledger with `default_branch` active and no commits.
    pub fn initialize(&self, default_branch: BranchName) -> anyhow::Result<BranchToken> {
        let mut map = BranchMap::default();
        let token = map.create(default_branch)?;

        self.write_mapper(&map)?;
        self.write_activity(&token, &[])?;
        self.set_active(&token)?;
        self.write_head(&Head::new(token.clone(), None))?;

        Ok(token)
    }

    pub fn read_head(&self) -> anyhow::Result<Head> {
        let raw = read_ledger_file(&self.head_path())?;

        Head::try_parse(&raw).map_err(|err| corrupted(format!("unreadable HEAD: {}", err)))
    }

    pub fn write_head(&self, head: &Head) -> anyhow::Result<()> {
        write_locked(&self.head_path(), &head.to_string())
    }

    pub fn active_token(&self) -> anyhow::Result<BranchToken> {
        let raw = read_ledger_file(&self.active_path())?;

        BranchToken::try_parse(&raw)
            .map_err(|err| corrupted(format!("unreadable active branch marker: {}", err)))
    }

    pub fn set_active(&self, token: &BranchToken) -> anyhow::Result<()> {
        write_locked(&self.active_path(), token.as_ref())
    }

    pub fn read_mapper(&self) -> anyhow::Result<BranchMap> {
        let raw = read_ledger_file(&self.mapper_path())?;

        BranchMap::from_json(&raw)
            .map_err(|err| corrupted(format!("unreadable branch mapping: {}", err)))
    }

    pub fn write_mapper(&self, map: &BranchMap) -> anyhow::Result<()> {
        write_locked(&self.mapper_path(), &map.to_json()?)
    }

    /// Name and token of the checked-out branch.
    pub fn active_branch(&self) -> anyhow::Result<(BranchName, BranchToken)> {
        let token = self.active_token()?;
        let name = self
            .read_mapper()?
            .name(&token)
            .cloned()
            .ok_or_else(|| corrupted(format!("active branch {} has no name", token)))?;

        Ok((name, token))
    }

    pub fn resolve_branch(&self, name: &BranchName) -> anyhow::Result<BranchToken> {
        self.read_mapper()?
            .token(name)
            .cloned()
            .ok_or_else(|| RepositoryError::BranchNotFound(name.to_string()).into())
    }

    pub fn activity(&self, token: &BranchToken) -> anyhow::Result<Vec<Revision>> {
        let raw = read_ledger_file(&self.activity_path(token))?;

        raw.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                Revision::try_parse(line)
                    .map_err(|err| corrupted(format!("activity of branch {}: {}", token, err)))
            })
            .collect()
    }

    pub fn write_activity(&self, token: &BranchToken, revisions: &[Revision]) -> anyhow::Result<()> {
        let content = revisions
            .iter()
            .map(|revision| format!("{}\n", revision))
            .collect::<String>();

        write_locked(&self.activity_path(token), &content)
    }

    /// Insert `revision` as the new tip of the branch.
    pub fn prepend_activity(&self, token: &BranchToken, revision: Revision) -> anyhow::Result<()> {
        let activity = std::iter::once(revision)
            .chain(self.activity(token)?)
            .collect::<Vec<_>>();

        self.write_activity(token, &activity)
    }

    pub fn tip(&self, token: &BranchToken) -> anyhow::Result<Option<Revision>> {
        Ok(self.activity(token)?.into_iter().next())
    }

    /// Register a new branch whose history starts at `seed`, if any.
    pub fn create_branch(
        &self,
        name: BranchName,
        seed: Option<Revision>,
    ) -> anyhow::Result<BranchToken> {
        let mut map = self.read_mapper()?;
        let token = map.create(name)?;

        self.write_activity(&token, seed.as_slice())?;
        self.write_mapper(&map)?;

        Ok(token)
    }

    /// Remove a branch and its activity; the active branch cannot be deleted.
    pub fn delete_branch(&self, name: &BranchName) -> anyhow::Result<BranchToken> {
        let mut map = self.read_mapper()?;
        let token = map
            .token(name)
            .cloned()
            .ok_or_else(|| RepositoryError::BranchNotFound(name.to_string()))?;

        if token == self.active_token()? {
            return Err(RepositoryError::ActiveBranch {
                action: "delete",
                name: name.to_string(),
            }
            .into());
        }

        map.remove(name);
        self.write_mapper(&map)?;

        let branch_dir = self.branches_path().join(token.as_ref());
        if branch_dir.exists() {
            std::fs::remove_dir_all(&branch_dir).with_context(|| {
                format!("failed to remove branch directory {}", branch_dir.display())
            })?;
        }

        Ok(token)
    }

    /// All branches sorted by name, the active one flagged.
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchListing>> {
        let active = self.active_token()?;

        Ok(self
            .read_mapper()?
            .iter()
            .map(|(name, token)| BranchListing {
                name: name.clone(),
                token: token.clone(),
                active: token == &active,
            })
            .collect())
    }
}

fn corrupted(detail: String) -> anyhow::Error {
    RepositoryError::Corrupted(detail).into()
}

fn read_ledger_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .map_err(|err| corrupted(format!("cannot read {}: {}", path.display(), err)))
}

fn write_locked(path: &Path, content: &str) -> anyhow::Result<()> {
    std::fs::create_dir_all(path.parent().with_context(|| {
        format!("failed to create parent directories for {}", path.display())
    })?)?;

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let mut lock = file_guard::lock(&mut file, Lock::Exclusive, 0, 1)?;

    lock.deref_mut().set_len(0)?;
    lock.deref_mut().write_all(content.as_bytes())?;

    Ok(())
}
