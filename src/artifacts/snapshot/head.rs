use crate::artifacts::branch::branch_map::BranchToken;
use crate::artifacts::snapshot::revision::Revision;
use std::fmt;

const HEAD_SEPARATOR: char = '@';

/// Contents of the HEAD file: the checked-out branch and the snapshot
/// materialized in the working directory, if any commit exists yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Head {
    pub branch: BranchToken,
    pub revision: Option<Revision>,
}

impl Head {
    pub fn new(branch: BranchToken, revision: Option<Revision>) -> Self {
        Head { branch, revision }
    }

    pub fn try_parse(raw: &str) -> anyhow::Result<Self> {
        let raw = raw.lines().next().unwrap_or_default().trim();
        let (branch, revision) = raw
            .split_once(HEAD_SEPARATOR)
            .ok_or_else(|| anyhow::anyhow!("HEAD is missing the '@' separator: {:?}", raw))?;

        let revision = match revision {
            "" => None,
            revision => Some(Revision::try_parse(revision)?),
        };

        Ok(Head {
            branch: BranchToken::try_parse(branch)?,
            revision,
        })
    }
}

impl fmt::Display for Head {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.revision {
            Some(revision) => write!(f, "{}{}{}", self.branch, HEAD_SEPARATOR, revision),
            None => write!(f, "{}{}", self.branch, HEAD_SEPARATOR),
        }
    }
}
