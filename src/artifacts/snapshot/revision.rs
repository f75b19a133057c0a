//! Revisions as stored in HEAD and branch activity lists
//!
//! A plain commit is stored as its snapshot id. A three-way merge result is stored as
//! `<id>&<parent1>&<parent2>&<base>`, which is parsed into [`Revision::Merge`] here and
//! nowhere else.

use crate::artifacts::snapshot::snapshot_id::SnapshotId;
use std::fmt;

const MERGE_SEPARATOR: char = '&';

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Revision {
    Simple(SnapshotId),
    Merge {
        id: SnapshotId,
        parent1: SnapshotId,
        parent2: SnapshotId,
        base: SnapshotId,
    },
}

impl Revision {
    pub fn try_parse(raw: &str) -> anyhow::Result<Self> {
        let parts = raw.trim().split(MERGE_SEPARATOR).collect::<Vec<_>>();

        match parts.as_slice() {
            [id] => Ok(Revision::Simple(SnapshotId::try_parse(id)?)),
            [id, parent1, parent2, base] => Ok(Revision::Merge {
                id: SnapshotId::try_parse(id)?,
                parent1: SnapshotId::try_parse(parent1)?,
                parent2: SnapshotId::try_parse(parent2)?,
                base: SnapshotId::try_parse(base)?,
            }),
            _ => anyhow::bail!("malformed revision: {}", raw),
        }
    }

    /// The snapshot directory this revision materializes.
    pub fn snapshot_id(&self) -> &SnapshotId {
        match self {
            Revision::Simple(id) => id,
            Revision::Merge { id, .. } => id,
        }
    }

    /// `(parent2, base)` of a merge revision.
    pub fn merged_from(&self) -> Option<(&SnapshotId, &SnapshotId)> {
        match self {
            Revision::Simple(_) => None,
            Revision::Merge { parent2, base, .. } => Some((parent2, base)),
        }
    }

    pub fn is_merge(&self) -> bool {
        matches!(self, Revision::Merge { .. })
    }

    pub fn same_snapshot(&self, other: &Revision) -> bool {
        self.snapshot_id() == other.snapshot_id()
    }
}

impl From<SnapshotId> for Revision {
    fn from(id: SnapshotId) -> Self {
        Revision::Simple(id)
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Revision::Simple(id) => write!(f, "{}", id),
            Revision::Merge {
                id,
                parent1,
                parent2,
                base,
            } => write!(
                f,
                "{id}{sep}{parent1}{sep}{parent2}{sep}{base}",
                sep = MERGE_SEPARATOR
            ),
        }
    }
}
