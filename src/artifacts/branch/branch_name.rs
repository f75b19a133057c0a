use crate::artifacts::branch::VALID_BRANCH_NAME_REGEX;
use crate::artifacts::core::error::RepositoryError;
use anyhow::Context;

/// User-facing branch name, e.g. `stem` or `feature/login-form`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: &str) -> anyhow::Result<Self> {
        let name = name.trim();

        let re = regex::Regex::new(VALID_BRANCH_NAME_REGEX)
            .with_context(|| format!("invalid branch name regex: {VALID_BRANCH_NAME_REGEX}"))?;

        if name.is_empty() || !re.is_match(name) {
            return Err(RepositoryError::InvalidBranchName(name.to_string()).into());
        }

        Ok(Self(name.to_string()))
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
