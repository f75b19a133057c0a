//! Porcelain commands (user-facing operations)
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository
//! - `add`: Stage changes for commit
//! - `commit`: Snapshot the staged changes
//! - `status`: Show staged, unstaged and untracked changes
//! - `diff`: Show changes between snapshots, branches, files and the working directory
//! - `log`: Show the active branch history
//! - `branch`: Create, list, or delete branches
//! - `checkout`: Switch branches
//! - `merge`: Fast-forward or three-way merge another branch into the active one

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod diff;
pub mod init;
pub mod log;
pub mod merge;
pub mod status;
