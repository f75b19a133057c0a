//! Error taxonomy surfaced to the user
//!
//! Most functions return `anyhow::Result` and attach context as they go. The variants
//! below mark the conditions that callers and the CLI need to tell apart: precondition
//! failures, unrelated histories and repository corruption.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("not a mygit repository (or any of the parent directories): {0}")]
    NotARepository(String),

    #[error("branch '{0}' not found. See 'mygit branch list' for available branches")]
    BranchNotFound(String),

    #[error("a branch named '{0}' already exists")]
    BranchExists(String),

    #[error("invalid branch name: '{0}'")]
    InvalidBranchName(String),

    #[error("cannot {action} the active branch '{name}'")]
    ActiveBranch { action: &'static str, name: String },

    #[error("aborting commit due to empty commit message")]
    EmptyMessage,

    #[error("nothing added to commit (use 'mygit add <files>...' to stage changes)")]
    NothingStaged,

    #[error("refusing to merge unrelated history of '{0}'")]
    UnrelatedHistories(String),

    #[error(
        "argument '{0}' is unknown: neither a revision, a branch nor a file path under this repository"
    )]
    UnknownTarget(String),

    #[error("repository corrupted: {0}")]
    Corrupted(String),
}
