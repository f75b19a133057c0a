//! Stateful repository areas
//!
//! - `database`: content store of immutable snapshots (`REPO/<id>`)
//! - `index`: staging index of pending changes (`STAGING`)
//! - `refs`: branch ledger, active branch marker and HEAD (`BRANCH/`, `HEAD`)
//! - `repository`: the context object tying the areas together
//! - `workspace`: working directory access, ignore rules and tree replication

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
