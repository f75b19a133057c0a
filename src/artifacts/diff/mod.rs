//! Line-level diffing
//!
//! - `diff_algorithm`: Myers' shortest edit script over arbitrary line slices
//! - `patch`: unified-diff hunks with context, rendering and per-file line stats
//! - `diff_target`: resolution of `diff` arguments into snapshots, branches or files

pub mod diff_algorithm;
pub mod diff_target;
pub mod patch;

/// Split text into lines, keeping each line's terminator so that a missing
/// trailing newline still counts as a change.
pub fn split_lines(content: &str) -> Vec<&str> {
    content.split_inclusive('\n').collect()
}
