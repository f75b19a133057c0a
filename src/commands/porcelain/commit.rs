use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_map::BranchToken;
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::snapshot::head::Head;
use crate::artifacts::snapshot::revision::Revision;
use std::io::Write;

impl Repository {
    pub async fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        let message = message.trim();
        if message.is_empty() {
            return Err(RepositoryError::EmptyMessage.into());
        }

        let index = self.index();
        let mut index = index.lock().await;

        // Load the staging file from the disk
        index.rehydrate()?;

        let base = self.working_version()?;
        // entries staged before a checkout or fast-forward may no longer apply
        let inspector = self.working_status().inspector(base.as_ref());
        index.retain(|entry| inspector.still_qualifies(entry));
        index.write_updates()?;

        if index.is_empty() {
            return Err(RepositoryError::NothingStaged.into());
        }

        let (branch_name, token) = self.refs().active_branch()?;
        let staged = index.entries().cloned().collect::<Vec<_>>();

        let id = self.database().write_snapshot(
            base.as_ref().map(Revision::snapshot_id),
            &staged,
            message,
            self.workspace(),
        )?;

        self.close_commit(&mut index, &token, Revision::Simple(id.clone()))?;

        let first_line = message.lines().next().unwrap_or_default();
        writeln!(self.writer(), "[{} {}] {}", branch_name, id, first_line)?;
        writeln!(
            self.writer(),
            " {} file{} changed",
            staged.len(),
            if staged.len() == 1 { "" } else { "s" }
        )?;

        Ok(())
    }

    /// Shared tail of commits and clean merges: empty the staging index, move HEAD
    /// and record `revision` as the tip of the branch.
    pub(crate) fn close_commit(
        &self,
        index: &mut Index,
        token: &BranchToken,
        revision: Revision,
    ) -> anyhow::Result<()> {
        index.clear();
        index.write_updates()?;

        self.refs()
            .write_head(&Head::new(token.clone(), Some(revision.clone())))?;
        self.refs().prepend_activity(token, revision)?;

        Ok(())
    }
}
