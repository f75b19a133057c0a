use crate::areas::repository::Repository;
use crate::artifacts::diff::diff_target::{DiffSource, DiffTarget, plan_comparisons};
use std::io::Write;

impl Repository {
    /// Print the patches between two targets; a missing `old` is the checked-out
    /// snapshot and a missing `new` is the working directory.
    pub async fn diff(&mut self, old: Option<&str>, new: Option<&str>) -> anyhow::Result<()> {
        let rules = self.workspace().ignore_rules()?;
        let current = DiffSource::from_version(self.working_version()?.as_ref());

        let old = old
            .map(|arg| DiffTarget::resolve(arg, self))
            .transpose()?;
        let new = new
            .map(|arg| DiffTarget::resolve(arg, self))
            .transpose()?;

        for comparison in plan_comparisons(self, &rules, current, old, new)? {
            if let Some(patch) = comparison.patch(self)? {
                write!(self.writer(), "{}", patch)?;
            }
        }

        Ok(())
    }
}
