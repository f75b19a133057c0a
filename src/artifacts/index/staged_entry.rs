use crate::artifacts::index::ENTRY_SEPARATOR;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChangeKind {
    Untracked,
    Modified,
    Deleted,
}

impl ChangeKind {
    pub fn try_parse(tag: &str) -> anyhow::Result<Self> {
        match tag {
            "U" => Ok(ChangeKind::Untracked),
            "M" => Ok(ChangeKind::Modified),
            "D" => Ok(ChangeKind::Deleted),
            _ => anyhow::bail!("unknown change kind: {:?}", tag),
        }
    }

    pub fn tag(&self) -> char {
        match self {
            ChangeKind::Untracked => 'U',
            ChangeKind::Modified => 'M',
            ChangeKind::Deleted => 'D',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChangeKind::Untracked => "NEW",
            ChangeKind::Modified => "MODIFIED",
            ChangeKind::Deleted => "DELETED",
        }
    }
}

/// A pending change: a path relative to the repository root tagged with its kind.
///
/// Ordering and equality are on the full decorated entry, so `M:a` and `D:a` are
/// distinct entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StagedEntry {
    pub path: PathBuf,
    pub kind: ChangeKind,
}

impl StagedEntry {
    pub fn new(kind: ChangeKind, path: impl Into<PathBuf>) -> Self {
        StagedEntry {
            path: path.into(),
            kind,
        }
    }

    pub fn try_parse(line: &str) -> anyhow::Result<Self> {
        let (tag, path) = line
            .trim_end_matches(['\r', '\n'])
            .split_once(ENTRY_SEPARATOR)
            .ok_or_else(|| anyhow::anyhow!("malformed staging entry: {:?}", line))?;

        if path.is_empty() {
            anyhow::bail!("staging entry without a path: {:?}", line);
        }

        Ok(StagedEntry::new(ChangeKind::try_parse(tag)?, path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for StagedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self
            .path
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        write!(f, "{}{}{}", self.kind.tag(), ENTRY_SEPARATOR, path)
    }
}
