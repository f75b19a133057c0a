//! Bijective mapping between branch tokens and branch names
//!
//! Persisted as `MAPPER.json`, a JSON array of `[token, name]` pairs.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::{BRANCH_TOKEN_LENGTH, BRANCH_TOKEN_REGEX};
use crate::artifacts::core::error::RepositoryError;
use crate::artifacts::snapshot::random_base32;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Opaque internal branch identifier; names the branch's directory under `BRANCH/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchToken(String);

impl BranchToken {
    pub fn generate() -> Self {
        Self(random_base32(BRANCH_TOKEN_LENGTH))
    }

    pub fn try_parse(token: &str) -> anyhow::Result<Self> {
        let token = token.trim();
        let re = regex::Regex::new(BRANCH_TOKEN_REGEX)?;

        if re.is_match(token) {
            Ok(Self(token.to_string()))
        } else {
            anyhow::bail!("invalid branch token: {:?}", token)
        }
    }
}

impl AsRef<str> for BranchToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<(String, String)>", try_from = "Vec<(String, String)>")]
pub struct BranchMap {
    by_name: BTreeMap<BranchName, BranchToken>,
    by_token: BTreeMap<BranchToken, BranchName>,
}

impl BranchMap {
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Record a new branch under a fresh token.
    pub fn create(&mut self, name: BranchName) -> anyhow::Result<BranchToken> {
        if self.by_name.contains_key(&name) {
            return Err(RepositoryError::BranchExists(name.to_string()).into());
        }

        let token = std::iter::repeat_with(BranchToken::generate)
            .find(|token| !self.by_token.contains_key(token))
            .ok_or_else(|| anyhow::anyhow!("unable to generate a branch token"))?;

        self.insert(token.clone(), name)?;

        Ok(token)
    }

    pub fn remove(&mut self, name: &BranchName) -> Option<BranchToken> {
        let token = self.by_name.remove(name)?;
        self.by_token.remove(&token);
        Some(token)
    }

    pub fn token(&self, name: &BranchName) -> Option<&BranchToken> {
        self.by_name.get(name)
    }

    pub fn name(&self, token: &BranchToken) -> Option<&BranchName> {
        self.by_token.get(token)
    }

    /// Branch names in alphabetical order, paired with their tokens.
    pub fn iter(&self) -> impl Iterator<Item = (&BranchName, &BranchToken)> {
        self.by_name.iter()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    fn insert(&mut self, token: BranchToken, name: BranchName) -> anyhow::Result<()> {
        if self.by_token.contains_key(&token) || self.by_name.contains_key(&name) {
            anyhow::bail!("duplicate branch mapping {} -> {}", token, name);
        }

        self.by_name.insert(name.clone(), token.clone());
        self.by_token.insert(token, name);

        Ok(())
    }
}

impl From<BranchMap> for Vec<(String, String)> {
    fn from(map: BranchMap) -> Self {
        map.by_token
            .into_iter()
            .map(|(token, name)| (token.to_string(), name.to_string()))
            .collect()
    }
}

impl TryFrom<Vec<(String, String)>> for BranchMap {
    type Error = anyhow::Error;

    fn try_from(pairs: Vec<(String, String)>) -> Result<Self, Self::Error> {
        pairs
            .into_iter()
            .try_fold(BranchMap::default(), |mut map, (token, name)| {
                map.insert(BranchToken::try_parse(&token)?, BranchName::try_parse(&name)?)?;
                Ok(map)
            })
    }
}
