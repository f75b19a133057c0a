//! Unified-diff style patches
//!
//! A [`Patch`] is only produced when at least one line was added or removed. Missing
//! content on either side is diffed as empty text and rendered as `/dev/null`, which
//! marks file creation and deletion.

use crate::artifacts::diff::diff_algorithm::{Edit, MyersDiff};
use crate::artifacts::diff::split_lines;
use colored::Colorize;
use std::fmt;

pub const HUNK_CONTEXT: usize = 3;
const NULL_PATH: &str = "/dev/null";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchLine {
    Context(String),
    Added(String),
    Removed(String),
}

impl fmt::Display for PatchLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchLine::Context(line) => write!(f, " {}", line),
            PatchLine::Added(line) => write!(f, "{}", format!("+{}", line).green()),
            PatchLine::Removed(line) => write!(f, "{}", format!("-{}", line).red()),
        }
    }
}

/// A contiguous run of changes plus surrounding context.
///
/// Starts are 1-based; a side with no lines reports the line *before* the hunk,
/// which is `0` for an empty file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    pub old_start: usize,
    pub old_lines: usize,
    pub new_start: usize,
    pub new_lines: usize,
    pub lines: Vec<PatchLine>,
}

impl Hunk {
    pub fn header(&self) -> String {
        format!(
            "@@ -{},{} +{},{} @@",
            self.old_start, self.old_lines, self.new_start, self.new_lines
        )
    }

    fn build(edits: &[Edit], positions: &[(usize, usize)], old: &[&str], new: &[&str]) -> Self {
        let (old_start, new_start) = positions[0];

        let lines = edits
            .iter()
            .map(|edit| match *edit {
                Edit::Equal { old: i, .. } => PatchLine::Context(strip_terminator(old[i])),
                Edit::Delete { old: i } => PatchLine::Removed(strip_terminator(old[i])),
                Edit::Insert { new: i } => PatchLine::Added(strip_terminator(new[i])),
            })
            .collect::<Vec<_>>();

        let old_lines = lines
            .iter()
            .filter(|l| !matches!(l, PatchLine::Added(_)))
            .count();
        let new_lines = lines
            .iter()
            .filter(|l| !matches!(l, PatchLine::Removed(_)))
            .count();

        Hunk {
            old_start: if old_lines == 0 { old_start } else { old_start + 1 },
            old_lines,
            new_start: if new_lines == 0 { new_start } else { new_start + 1 },
            new_lines,
            lines,
        }
    }
}

/// Added/removed line counts of a patch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStat {
    pub added: usize,
    pub removed: usize,
}

impl fmt::Display for DiffStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            "+".repeat(self.added).green(),
            "-".repeat(self.removed).red()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    pub old_label: String,
    pub new_label: String,
    /// `false` when the old side was missing (file created)
    pub old_exists: bool,
    /// `false` when the new side was missing (file deleted)
    pub new_exists: bool,
    pub hunks: Vec<Hunk>,
}

impl Patch {
    /// Diff two contents; `None` content means the file does not exist on that side.
    ///
    /// Returns `None` when the contents are line-identical.
    pub fn compute(
        old_label: &str,
        old: Option<&str>,
        new_label: &str,
        new: Option<&str>,
    ) -> Option<Patch> {
        let old_lines = split_lines(old.unwrap_or_default());
        let new_lines = split_lines(new.unwrap_or_default());

        let edits = MyersDiff::new(&old_lines, &new_lines).diff();
        if !edits.iter().any(Edit::is_change) {
            return None;
        }

        Some(Patch {
            old_label: old_label.to_string(),
            new_label: new_label.to_string(),
            old_exists: old.is_some(),
            new_exists: new.is_some(),
            hunks: Self::hunks(&edits, &old_lines, &new_lines),
        })
    }

    fn hunks(edits: &[Edit], old: &[&str], new: &[&str]) -> Vec<Hunk> {
        // (old, new) line offsets reached before each edit
        let positions = edits
            .iter()
            .scan((0usize, 0usize), |pos, edit| {
                let before = *pos;
                match edit {
                    Edit::Equal { .. } => *pos = (pos.0 + 1, pos.1 + 1),
                    Edit::Delete { .. } => pos.0 += 1,
                    Edit::Insert { .. } => pos.1 += 1,
                }
                Some(before)
            })
            .collect::<Vec<_>>();

        let changes = edits
            .iter()
            .enumerate()
            .filter(|(_, edit)| edit.is_change())
            .map(|(i, _)| i)
            .collect::<Vec<_>>();

        // group changes whose separating context would overlap or touch
        let mut groups: Vec<(usize, usize)> = Vec::new();
        for &i in &changes {
            match groups.last_mut() {
                Some((_, last)) if i - *last <= 2 * HUNK_CONTEXT + 1 => *last = i,
                _ => groups.push((i, i)),
            }
        }

        groups
            .into_iter()
            .map(|(first, last)| {
                let start = first.saturating_sub(HUNK_CONTEXT);
                let end = (last + HUNK_CONTEXT + 1).min(edits.len());
                Hunk::build(&edits[start..end], &positions[start..end], old, new)
            })
            .collect()
    }

    pub fn stat(&self) -> DiffStat {
        self.hunks
            .iter()
            .flat_map(|hunk| &hunk.lines)
            .fold(DiffStat::default(), |mut stat, line| {
                match line {
                    PatchLine::Added(_) => stat.added += 1,
                    PatchLine::Removed(_) => stat.removed += 1,
                    PatchLine::Context(_) => {}
                }
                stat
            })
    }

    fn old_path(&self) -> String {
        if self.old_exists {
            format!("a/{}", self.old_label)
        } else {
            NULL_PATH.to_string()
        }
    }

    fn new_path(&self) -> String {
        if self.new_exists {
            format!("b/{}", self.new_label)
        } else {
            NULL_PATH.to_string()
        }
    }
}

impl fmt::Display for Patch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}",
            format!("diff --mygit a/{} b/{}", self.old_label, self.new_label).bold()
        )?;
        if !self.old_exists {
            writeln!(f, "{}", "new file".bold())?;
        } else if !self.new_exists {
            writeln!(f, "{}", "deleted file".bold())?;
        }
        writeln!(f, "{}", format!("--- {}", self.old_path()).bold())?;
        writeln!(f, "{}", format!("+++ {}", self.new_path()).bold())?;

        for hunk in &self.hunks {
            writeln!(f, "{}", hunk.header().cyan())?;
            for line in &hunk.lines {
                writeln!(f, "{}", line)?;
            }
        }

        Ok(())
    }
}

fn strip_terminator(line: &str) -> String {
    line.trim_end_matches(['\n', '\r']).to_string()
}
