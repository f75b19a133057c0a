//! Merge engine
//!
//! - `ancestry`: common base search over two activity lists and the resulting plan
//!   (up to date, fast-forward or three-way)
//! - `three_way`: line-level three-way merge of a single file with conflict markers
//!
//! ## Debug Logging
//!
//! Building with `--features debug_merge` traces the base search and the hunk
//! clustering on stderr.

/// Macro for debug logging that is enabled with the debug_merge feature flag
///
/// # Usage
/// ```rust,ignore
/// debug_log!("common base at index {}", index);
/// ```
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_merge")]
        {
            eprintln!($($arg)*);
        }
    };
}

pub mod ancestry;
pub mod three_way;
