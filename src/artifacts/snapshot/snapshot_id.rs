use crate::artifacts::snapshot::random_base32;
use std::fmt;

const TOKEN_LENGTH: usize = 8;
const SNAPSHOT_ID_REGEX: &str = r"^[A-Z2-7]{8}T[0-9]+$";

/// Name of a snapshot directory under `REPO/`.
///
/// The random prefix keeps ids unique; the millisecond suffix gives a stable
/// creation-order proxy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SnapshotId(String);

impl SnapshotId {
    pub fn generate() -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        Self(format!("{}T{}", random_base32(TOKEN_LENGTH), millis))
    }

    pub fn try_parse(id: &str) -> anyhow::Result<Self> {
        if Self::is_valid(id) {
            Ok(Self(id.to_string()))
        } else {
            anyhow::bail!("invalid snapshot id: {}", id)
        }
    }

    pub fn is_valid(id: &str) -> bool {
        regex::Regex::new(SNAPSHOT_ID_REGEX)
            .map(|re| re.is_match(id))
            .unwrap_or(false)
    }

    /// Milliseconds since the epoch encoded in the id.
    pub fn timestamp_millis(&self) -> Option<i64> {
        self.0.split_once('T').and_then(|(_, ms)| ms.parse().ok())
    }
}

impl AsRef<str> for SnapshotId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
