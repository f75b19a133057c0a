use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use anyhow::Context;
use std::fs;
use std::io::Write;

const DEFAULT_BRANCH: &str = "stem";

impl Repository {
    pub async fn init(&mut self) -> anyhow::Result<()> {
        if self.is_initialized() {
            writeln!(
                self.writer(),
                "Reinitialized existing mygit repository in {}",
                self.metadata_path().display()
            )?;
            return Ok(());
        }

        fs::create_dir_all(self.database().repo_path())
            .context("Failed to create .mygit/REPO directory")?;

        fs::create_dir_all(self.refs().branches_path())
            .context("Failed to create .mygit/BRANCH directory")?;

        self.refs()
            .initialize(BranchName::try_parse(DEFAULT_BRANCH)?)
            .context("Failed to create the default branch")?;

        let index = self.index();
        let index = index.lock().await;
        // make sure the staging file exists
        if !index.path().exists() {
            fs::write(index.path(), b"").context("Failed to create .mygit/STAGING file")?;
        }

        writeln!(
            self.writer(),
            "Initialized empty mygit repository in {}",
            self.metadata_path().display()
        )?;

        Ok(())
    }
}
