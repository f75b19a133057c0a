//! Snapshot identifiers and the pointers that reference them
//!
//! - `snapshot_id`: the generated `<base32>T<millis>` name of a snapshot directory
//! - `revision`: a snapshot id, optionally carrying merge lineage (`id&p1&p2&base`)
//! - `head`: the `<branchToken>@<revision>` HEAD pointer

pub mod head;
pub mod revision;
pub mod snapshot_id;

use fake::rand;

const BASE32_CHARSET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Random upper-case base-32 token of the given length.
pub fn random_base32(length: usize) -> String {
    (0..length)
        .map(|_| BASE32_CHARSET[rand::random::<u8>() as usize % BASE32_CHARSET.len()] as char)
        .collect()
}
