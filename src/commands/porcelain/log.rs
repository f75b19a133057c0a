use crate::areas::repository::Repository;
use crate::artifacts::snapshot::revision::Revision;
use chrono::{DateTime, Local};
use colored::Colorize;
use std::io::Write;

const DATE_FORMAT: &str = "%a %b %-d %H:%M:%S %Y %z";

struct LogEntry {
    revision: Revision,
    created_at: DateTime<Local>,
    message: String,
}

impl Repository {
    /// Show the active branch history, newest snapshot first.
    pub fn log(&self) -> anyhow::Result<()> {
        let (branch_name, token) = self.refs().active_branch()?;
        let activity = self.refs().activity(&token)?;

        if activity.is_empty() {
            writeln!(
                self.writer(),
                "No commits made on this branch ({})",
                branch_name
            )?;
            return Ok(());
        }

        let mut entries = activity
            .into_iter()
            .map(|revision| {
                let id = revision.snapshot_id();
                Ok(LogEntry {
                    created_at: self.database().created_at(id)?,
                    message: self.database().message(id)?,
                    revision,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        entries.sort_by_key(|entry| {
            std::cmp::Reverse((
                entry.created_at,
                entry.revision.snapshot_id().timestamp_millis(),
            ))
        });

        let head = self.working_version()?;
        let branches = self
            .refs()
            .list_branches()?
            .into_iter()
            .filter(|branch| !branch.active)
            .map(|branch| Ok((branch.name, self.refs().tip(&branch.token)?)))
            .collect::<anyhow::Result<Vec<_>>>()?;

        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                writeln!(self.writer())?;
            }

            let mut decorations = Vec::new();
            if head
                .as_ref()
                .is_some_and(|head| head.same_snapshot(&entry.revision))
            {
                decorations.push(format!("HEAD -> {}", branch_name));
            }
            decorations.extend(
                branches
                    .iter()
                    .filter(|(_, tip)| {
                        tip.as_ref()
                            .is_some_and(|tip| tip.same_snapshot(&entry.revision))
                    })
                    .map(|(name, _)| name.to_string()),
            );

            self.show_entry(entry, &decorations)?;
        }

        Ok(())
    }

    fn show_entry(&self, entry: &LogEntry, decorations: &[String]) -> anyhow::Result<()> {
        let decoration = if decorations.is_empty() {
            String::new()
        } else {
            format!(" ({})", decorations.join(", "))
        };

        writeln!(
            self.writer(),
            "{}",
            format!("commit {}{}", entry.revision.snapshot_id(), decoration).yellow()
        )?;
        if let Revision::Merge {
            parent1, parent2, ..
        } = &entry.revision
        {
            writeln!(self.writer(), "Merge: {} {}", parent1, parent2)?;
        }
        writeln!(
            self.writer(),
            "Date:   {}",
            entry.created_at.format(DATE_FORMAT)
        )?;
        writeln!(self.writer())?;
        for message_line in entry.message.lines() {
            writeln!(self.writer(), "    {}", message_line)?;
        }

        Ok(())
    }
}
