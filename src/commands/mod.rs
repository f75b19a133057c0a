//! Command implementations
//!
//! Every user command is an `impl Repository` block under `porcelain`, one file per
//! command. Commands read and write the repository areas and report through the
//! repository writer.

pub mod porcelain;
