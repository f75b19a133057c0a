use crate::artifacts::index::staged_entry::{ChangeKind, StagedEntry};
use colored::Colorize;

const INDENT: &str = "    ";

/// Outcome of comparing a working file with the checked-out snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Classification {
    #[default]
    Unchanged,
    Untracked,
    Modified,
}

impl Classification {
    /// The staging kind this classification qualifies for, if any.
    pub fn staged_kind(&self) -> Option<ChangeKind> {
        match self {
            Classification::Unchanged => None,
            Classification::Untracked => Some(ChangeKind::Untracked),
            Classification::Modified => Some(ChangeKind::Modified),
        }
    }
}

/// Section a change is listed under by `status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeSection {
    Staged,
    Unstaged,
    Untracked,
}

impl ChangeSection {
    pub fn header(&self) -> &'static str {
        match self {
            ChangeSection::Staged => "Changes to be committed:",
            ChangeSection::Unstaged => {
                "Changes not staged:\n  (use 'mygit add <files>...' to stage them)"
            }
            ChangeSection::Untracked => {
                "Untracked files:\n  (use 'mygit add <files>...' to include them in the next commit)"
            }
        }
    }

    pub fn format_entry(&self, entry: &StagedEntry) -> String {
        let line = format!(
            "{}{}: {}",
            INDENT,
            entry.kind.label(),
            entry.path().display()
        );

        match self {
            ChangeSection::Staged => line.green().to_string(),
            ChangeSection::Unstaged | ChangeSection::Untracked => line.red().to_string(),
        }
    }
}
