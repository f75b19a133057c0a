use crate::areas::repository::Repository;
use crate::artifacts::index::staged_entry::StagedEntry;
use crate::artifacts::status::file_change::ChangeSection;
use colored::Colorize;
use std::io::Write;

impl Repository {
    pub async fn status(&mut self) -> anyhow::Result<()> {
        let rules = self.workspace().ignore_rules()?;
        let status = self.working_status().initialize(&rules).await?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let (branch_name, _) = self.refs().active_branch()?;
        writeln!(self.writer(), "On branch {}", branch_name.to_string().bold())?;

        let (staged, unstaged, untracked) = status.partition(&index);
        if staged.is_empty() && unstaged.is_empty() && untracked.is_empty() {
            writeln!(self.writer(), "nothing to commit, working tree clean")?;
            return Ok(());
        }

        self.print_section(ChangeSection::Staged, &staged)?;
        self.print_section(ChangeSection::Unstaged, &unstaged)?;
        self.print_section(ChangeSection::Untracked, &untracked)?;

        Ok(())
    }

    fn print_section(&self, section: ChangeSection, entries: &[StagedEntry]) -> anyhow::Result<()> {
        if entries.is_empty() {
            return Ok(());
        }

        writeln!(self.writer())?;
        writeln!(self.writer(), "{}", section.header())?;
        for entry in entries {
            writeln!(self.writer(), "{}", section.format_entry(entry))?;
        }

        Ok(())
    }
}
