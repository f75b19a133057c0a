//! Branch naming and the token <-> name ledger
//!
//! Branches are addressed internally by a generated token (the directory holding their
//! activity list) and externally by a user-chosen name.

pub mod branch_map;
pub mod branch_name;

pub const VALID_BRANCH_NAME_REGEX: &str =
    r"^[a-zA-Z0-9][-a-zA-Z0-9]*(/[a-zA-Z0-9][-a-zA-Z0-9]*)?$";
pub const BRANCH_TOKEN_REGEX: &str = r"^[A-Z2-7]+$";
pub const BRANCH_TOKEN_LENGTH: usize = 12;

/// Names that always resolve to the checked-out snapshot.
pub const REF_ALIASES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "@" => "HEAD",
    "HEAD" => "HEAD",
};
