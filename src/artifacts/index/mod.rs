//! Staging index data structures
//!
//! The staging file holds one decorated entry per line, `<kind>:<relativePath>`,
//! where kind is `U` (new/untracked), `M` (modified) or `D` (deleted).

pub mod staged_entry;

pub const ENTRY_SEPARATOR: char = ':';
