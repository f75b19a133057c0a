//! Staging index
//!
//! The index is the ledger of pending changes consumed by the next commit. It is
//! persisted as the `STAGING` file, one decorated entry (`<kind>:<path>`) per line.
//!
//! ## Update protocol
//!
//! Staging appends the newly qualified entries to the file first, then reloads it,
//! deduplicates on the full decorated entry and rewrites it. A crash between the two
//! steps leaves duplicate lines behind, which the next reload collapses.

use crate::artifacts::index::staged_entry::StagedEntry;
use anyhow::Context;
use file_guard::Lock;
use std::collections::BTreeSet;
use std::io::{Read, Write};
use std::ops::DerefMut;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the staging file (typically `.mygit/STAGING`)
    path: Box<Path>,
    /// Deduplicated entries, ordered by path then kind
    entries: BTreeSet<StagedEntry>,
    /// Whether `entries` diverged from the file since the last load
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeSet::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> impl Iterator<Item = &StagedEntry> {
        self.entries.iter()
    }

    pub fn contains(&self, entry: &StagedEntry) -> bool {
        self.entries.contains(entry)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Load the staging file, deduplicating its lines.
    ///
    /// # Locking
    ///
    /// Acquires a shared lock on the staging file while reading.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.entries.clear();
        self.changed = false;

        if !self.path.exists() {
            std::fs::File::create(&self.path)
                .with_context(|| format!("failed to create {}", self.path.display()))?;
            return Ok(());
        }

        let mut file = std::fs::OpenOptions::new().read(true).open(&self.path)?;
        let mut lock = file_guard::lock(&mut file, Lock::Shared, 0, 1)?;

        let mut content = String::new();
        lock.deref_mut().read_to_string(&mut content)?;

        let mut lines = 0;
        for line in content.lines().filter(|line| !line.trim().is_empty()) {
            self.entries.insert(StagedEntry::try_parse(line)?);
            lines += 1;
        }
        self.changed = lines != self.entries.len();

        Ok(())
    }

    /// Append entries to the staging file without touching the in-memory set.
    ///
    /// # Locking
    ///
    /// Acquires an exclusive lock on the staging file while writing.
    pub fn append(&self, entries: &[StagedEntry]) -> anyhow::Result<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open {}", self.path.display()))?;
        let mut lock = file_guard::lock(&mut file, Lock::Exclusive, 0, 1)?;

        let content = entries
            .iter()
            .map(|entry| format!("{}\n", entry))
            .collect::<String>();
        lock.deref_mut().write_all(content.as_bytes())?;

        Ok(())
    }

    /// Keep only the entries for which `keep` holds.
    pub fn retain(&mut self, mut keep: impl FnMut(&StagedEntry) -> bool) {
        let before = self.entries.len();
        self.entries.retain(|entry| keep(entry));
        self.changed |= before != self.entries.len();
    }

    pub fn clear(&mut self) {
        self.changed |= !self.entries.is_empty();
        self.entries.clear();
    }

    /// Rewrite the staging file from the in-memory set if it changed.
    ///
    /// # Locking
    ///
    /// Acquires an exclusive lock on the staging file while writing.
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if !self.changed && self.path.exists() {
            return Ok(());
        }

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.path)
            .with_context(|| format!("failed to open {}", self.path.display()))?;
        let mut lock = file_guard::lock(&mut file, Lock::Exclusive, 0, 1)?;

        let content = self
            .entries
            .iter()
            .map(|entry| format!("{}\n", entry))
            .collect::<String>();

        lock.deref_mut().set_len(0)?;
        lock.deref_mut().write_all(content.as_bytes())?;
        self.changed = false;

        Ok(())
    }
}
