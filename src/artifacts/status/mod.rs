//! Change detection
//!
//! Classifies working directory paths against the snapshot checked out in HEAD.
//!
//! ## Components
//!
//! - `file_change`: classification outcomes and their `status` rendering
//! - `inspector`: per-path classification, deletion detection and revalidation
//! - `status_info`: whole working directory scan

pub mod file_change;
pub mod inspector;
pub mod status_info;
