//! Common base search over activity lists
//!
//! Activity lists are tip first. The common base index is the first position in
//! branch2's list whose snapshot also appears anywhere in branch1's list. Revisions
//! are compared by snapshot id, so a merge revision matches its plain form.

use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::snapshot::revision::Revision;
use crate::artifacts::snapshot::snapshot_id::SnapshotId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergePlan {
    UpToDate,
    /// Branch1 contributed nothing since the base; adopt branch2's newer entries
    FastForward {
        activity: Vec<Revision>,
        tip: Revision,
    },
    ThreeWay {
        base: SnapshotId,
        tip1: Revision,
        tip2: Revision,
    },
}

/// Index in `branch2` of the first snapshot shared with `branch1`.
pub fn common_base_index(branch1: &[Revision], branch2: &[Revision]) -> Option<usize> {
    let index = branch2.iter().position(|candidate| {
        branch1
            .iter()
            .any(|revision| revision.same_snapshot(candidate))
    });

    debug_log!("common base index: {:?}", index);
    index
}

/// Decide how to merge `branch2` (named `branch2_name`) into the checked-out `branch1`.
pub fn plan_merge(
    branch1: &[Revision],
    branch2: &[Revision],
    branch2_name: &str,
) -> anyhow::Result<MergePlan> {
    let Some(tip2) = branch2.first() else {
        return Ok(MergePlan::UpToDate);
    };

    if let Some(tip1) = branch1.first()
        && tip1.same_snapshot(tip2)
    {
        return Ok(MergePlan::UpToDate);
    }

    let index = common_base_index(branch1, branch2)
        .ok_or_else(|| RepositoryError::UnrelatedHistories(branch2_name.to_string()))?;
    let base = &branch2[index];
    // a shared snapshot implies branch1 is not empty
    let tip1 = &branch1[0];

    if tip1.same_snapshot(base) {
        let activity = branch2[..index]
            .iter()
            .chain(branch1)
            .cloned()
            .collect::<Vec<_>>();
        debug_log!("fast-forward over {} revisions", index);

        return Ok(MergePlan::FastForward {
            activity,
            tip: tip2.clone(),
        });
    }

    if index == 0 {
        debug_log!("{} is already part of the history", tip2);
        return Ok(MergePlan::UpToDate);
    }

    if tip1.merged_from() == Some((tip2.snapshot_id(), base.snapshot_id())) {
        debug_log!("{} already records a merge of {}", tip1, tip2);
        return Ok(MergePlan::UpToDate);
    }

    Ok(MergePlan::ThreeWay {
        base: base.snapshot_id().clone(),
        tip1: tip1.clone(),
        tip2: tip2.clone(),
    })
}
