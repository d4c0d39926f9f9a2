//! Seeded variant selection.
//!
//! Index = (first 8 bytes of SHA-256 over `seed|key|outcome`, big endian,
//! plus the offset) mod list length. The digest is fixed across platforms,
//! so a stored seed reproduces the same copy anywhere.

use sha2::{Digest, Sha256};

pub fn variant_index(seed: &str, key: &str, outcome: &str, offset: u64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let digest = Sha256::digest(format!("{seed}|{key}|{outcome}").as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);

    let len = len as u64;
    let base = u64::from_be_bytes(head) % len;
    ((base + offset % len) % len) as usize
}

pub fn select<'a, T>(
    items: &'a [T],
    seed: &str,
    key: &str,
    outcome: &str,
    offset: u64,
) -> Option<&'a T> {
    items.get(variant_index(seed, key, outcome, offset, items.len()))
}
