//! Version-control data structures and algorithms
//!
//! - `branch`: branch names, tokens and the name <-> token ledger
//! - `core`: error taxonomy and the pager writer
//! - `diff`: Myers' diff, patches and `diff` target resolution
//! - `index`: decorated staging entries
//! - `merge`: common base search, fast-forward planning and three-way text merge
//! - `snapshot`: snapshot ids, revisions and the HEAD pointer
//! - `status`: working directory change detection

pub mod branch;
pub mod core;
pub mod diff;
pub mod index;
pub mod merge;
pub mod snapshot;
pub mod status;
