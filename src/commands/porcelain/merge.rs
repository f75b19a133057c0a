use crate::areas::repository::Repository;
use crate::areas::workspace::IgnoreRules;
use crate::artifacts::branch::branch_map::BranchToken;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::diff::diff_target::{DiffSource, DiffTarget, plan_comparisons};
use crate::artifacts::merge::ancestry::{MergePlan, plan_merge};
use crate::artifacts::merge::three_way::{
    FileOutcome, MergeLabels, MergePreference, Untouched, merge_file, resolve_untouched,
};
use crate::artifacts::snapshot::head::Head;
use crate::artifacts::snapshot::revision::Revision;
use crate::artifacts::snapshot::snapshot_id::SnapshotId;
use colored::Colorize;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    UpToDate,
    FastForward,
    Merged,
    /// Paths left with conflict markers in the working directory
    Conflicted(Vec<PathBuf>),
}

impl Repository {
    /// Merge the branch named `target` into the checked-out branch.
    pub async fn merge(
        &mut self,
        target: &str,
        preference: Option<MergePreference>,
    ) -> anyhow::Result<MergeOutcome> {
        let (current_name, current_token) = self.refs().active_branch()?;
        let target_name = BranchName::try_parse(target)?;
        let target_token = self.refs().resolve_branch(&target_name)?;

        let current_activity = self.refs().activity(&current_token)?;
        let target_activity = self.refs().activity(&target_token)?;
        let rules = self.workspace().ignore_rules()?;

        match plan_merge(&current_activity, &target_activity, target_name.as_ref())? {
            MergePlan::UpToDate => {
                writeln!(self.writer(), "Already up to date.")?;
                Ok(MergeOutcome::UpToDate)
            }
            MergePlan::FastForward { activity, tip } => {
                self.fast_forward(&current_token, &current_activity, activity, tip, &rules)?;
                Ok(MergeOutcome::FastForward)
            }
            MergePlan::ThreeWay { base, tip1, tip2 } => {
                let labels = MergeLabels {
                    ours: current_name.as_ref(),
                    theirs: target_name.as_ref(),
                };

                self.three_way_merge(&current_token, base, tip1, tip2, labels, preference, &rules)
                    .await
            }
        }
    }

    fn fast_forward(
        &self,
        token: &BranchToken,
        previous: &[Revision],
        activity: Vec<Revision>,
        tip: Revision,
        rules: &IgnoreRules,
    ) -> anyhow::Result<()> {
        // a fast-forward always starts from an existing tip
        let old_tip = previous
            .first()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("cannot fast-forward a branch without commits"))?;

        writeln!(
            self.writer(),
            "Updating {}..{}",
            old_tip.snapshot_id(),
            tip.snapshot_id()
        )?;
        writeln!(self.writer(), "Fast-forward")?;

        let comparisons = plan_comparisons(
            self,
            rules,
            DiffSource::from_version(Some(&old_tip)),
            Some(DiffTarget::Snapshot(old_tip.clone())),
            Some(DiffTarget::Snapshot(tip.clone())),
        )?;
        for comparison in comparisons {
            if let Some(patch) = comparison.patch(self)? {
                writeln!(
                    self.writer(),
                    " {}: {}",
                    comparison.new_path.display(),
                    patch.stat()
                )?;
            }
        }

        self.refs().write_activity(token, &activity)?;
        self.workspace()
            .sync_from(&self.database().store_path(tip.snapshot_id()), rules)?;
        self.refs()
            .write_head(&Head::new(token.clone(), Some(tip)))?;

        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    async fn three_way_merge(
        &self,
        token: &BranchToken,
        base: SnapshotId,
        tip1: Revision,
        tip2: Revision,
        labels: MergeLabels<'_>,
        preference: Option<MergePreference>,
        rules: &IgnoreRules,
    ) -> anyhow::Result<MergeOutcome> {
        let database = self.database();
        let ours = tip1.snapshot_id();
        let theirs = tip2.snapshot_id();

        let provisional = database.create_snapshot(Some(&base))?;
        let paths = database
            .list_files(&base, rules)?
            .into_iter()
            .chain(database.list_files(ours, rules)?)
            .chain(database.list_files(theirs, rules)?)
            .collect::<BTreeSet<_>>();

        let mut conflicts = Vec::new();
        for path in paths {
            let base_bytes = database.read_bytes(&provisional, &path)?;
            let ours_bytes = database.read_bytes(ours, &path)?;
            let theirs_bytes = database.read_bytes(theirs, &path)?;

            match resolve_untouched(
                base_bytes.as_deref(),
                ours_bytes.as_deref(),
                theirs_bytes.as_deref(),
            ) {
                Some(Untouched::Base) => continue,
                Some(Untouched::Take(bytes)) => {
                    database.write_file(&provisional, &path, bytes)?;
                    continue;
                }
                Some(Untouched::Delete) => {
                    database.remove_file(&provisional, &path)?;
                    continue;
                }
                None => {}
            }

            let base_text = base_bytes.as_deref().map(String::from_utf8_lossy);
            let ours_text = ours_bytes.as_deref().map(String::from_utf8_lossy);
            let theirs_text = theirs_bytes.as_deref().map(String::from_utf8_lossy);
            let outcome = merge_file(
                base_text.as_deref(),
                ours_text.as_deref(),
                theirs_text.as_deref(),
                labels,
                preference,
            );

            match outcome {
                FileOutcome::Write(result) => {
                    database.write_file(&provisional, &path, result.content())?;
                    if result.is_conflicted() {
                        conflicts.push(path);
                    }
                }
                FileOutcome::Delete => database.remove_file(&provisional, &path)?,
            }
        }

        self.workspace()
            .sync_from(&database.store_path(&provisional), rules)?;

        if !conflicts.is_empty() {
            database.remove_snapshot(&provisional)?;

            for path in &conflicts {
                writeln!(
                    self.writer(),
                    "CONFLICT (content): Merge conflict in {}",
                    path.display()
                )?;
            }
            eprintln!(
                "{}",
                "Automatic merge failed; fix conflicts and then commit the result.".red()
            );

            return Ok(MergeOutcome::Conflicted(conflicts));
        }

        database.write_message(
            &provisional,
            &format!("Merge branch '{}' into '{}'", labels.theirs, labels.ours),
        )?;

        let revision = Revision::Merge {
            id: provisional,
            parent1: ours.clone(),
            parent2: theirs.clone(),
            base,
        };

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;
        self.close_commit(&mut index, token, revision)?;

        writeln!(self.writer(), "Merge made by the 'three-way' strategy.")?;

        Ok(MergeOutcome::Merged)
    }
}
