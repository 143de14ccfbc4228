//! Stable hashing of mangled strings.
//!
//! Signature ids must be identical across compiler runs, hosts and platforms,
//! so the hash is taken from a fixed cryptographic digest rather than from
//! `std`'s randomly seeded hashers.

/// Top bit set on every hash produced from a public mangle. Keeps public ids
/// disjoint from small file-local and built-in indices.
pub const PUBLIC_MANGLE_FLAG: u64 = 1 << 63;

/// 64-bit digest of `input`: the first eight bytes of its BLAKE3 hash, read
/// little endian.
pub fn hash64(input: &str) -> u64 {
    let digest = blake3::hash(input.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest.as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}

/// Signature id for a mangle: [`hash64`] with [`PUBLIC_MANGLE_FLAG`] forced on.
pub fn hash_mangle(mangle: &str) -> i64 {
    (hash64(mangle) | PUBLIC_MANGLE_FLAG) as i64
}

#[cfg(test)]
#[path = "../tests/hash_tests.rs"]
mod tests;
