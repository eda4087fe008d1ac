//! SHA-512 content digests
//!
//! Restriction identities are derived from a truncated digest of the token
//! they were rendered from, so any process can re-derive the same marker or
//! label without a registry.

use sha2::{Digest, Sha512};

/// Hex-encode the first `len` bytes of the SHA-512 digest of `content`.
///
/// `len` is clamped to the digest size (64 bytes).
pub fn content_digest(content: &str, len: usize) -> String {
    let digest = Sha512::digest(content.as_bytes());
    digest
        .iter()
        .take(len)
        .map(|byte| format!("{:02x}", byte))
        .collect()
}
