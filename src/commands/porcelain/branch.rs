use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Create a branch starting at the checked-out snapshot.
    pub fn create_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name)?;
        let seed = self.working_version()?;

        self.refs().create_branch(branch_name.clone(), seed)?;

        writeln!(self.writer(), "Created branch '{}'", branch_name)?;

        Ok(())
    }

    pub fn delete_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name)?;

        self.refs().delete_branch(&branch_name)?;

        writeln!(self.writer(), "Deleted branch '{}'", branch_name)?;

        Ok(())
    }

    pub fn list_branches(&self) -> anyhow::Result<()> {
        for branch in self.refs().list_branches()? {
            if branch.active {
                writeln!(
                    self.writer(),
                    "* {}",
                    branch.name.to_string().green().bold()
                )?;
            } else {
                writeln!(self.writer(), "  {}", branch.name)?;
            }
        }

        Ok(())
    }
}
