use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::snapshot::head::Head;

impl Repository {
    /// Switch to another branch: drop the staged changes, move HEAD to the branch tip
    /// and mirror the tip into the working directory.
    pub async fn checkout(&mut self, target: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(target)?;
        let token = self.refs().resolve_branch(&branch_name)?;

        if token == self.refs().active_token()? {
            return Err(RepositoryError::ActiveBranch {
                action: "check out",
                name: branch_name.to_string(),
            }
            .into());
        }

        let index = self.index();
        let mut index = index.lock().await;

        index.rehydrate()?;
        index.clear();
        index.write_updates()?;

        let tip = self.refs().tip(&token)?;
        self.refs().set_active(&token)?;
        self.refs().write_head(&Head::new(token, tip.clone()))?;

        if let Some(tip) = tip {
            let rules = self.workspace().ignore_rules()?;
            let store = self.database().store_path(tip.snapshot_id());
            self.workspace().sync_from(&store, &rules)?;
        }

        eprintln!("Switched to branch '{}'", branch_name);

        Ok(())
    }
}
