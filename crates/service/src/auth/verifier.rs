//! Password verification against a stored digest and salt.

use subtle::{Choice, ConstantTimeEq};

use super::hasher::{hash_password, DIGEST_LEN};

/// Recompute the digest of `plaintext` under `stored_salt` and compare it
/// with `stored_hash`.
///
/// Returns `false` for any stored hash that is not exactly `DIGEST_LEN`
/// bytes; malformed records never panic.
pub fn verify_password(plaintext: &[u8], stored_hash: &[u8], stored_salt: &[u8]) -> bool {
    let candidate = hash_password(plaintext, Some(stored_salt));
    digests_match(&candidate.hash, stored_hash)
}

/// Constant-time digest equality. Every byte position is visited whatever
/// the position of the first difference.
pub fn digests_match(candidate: &[u8; DIGEST_LEN], stored: &[u8]) -> bool {
    // Digest length is public, so rejecting on it leaks nothing.
    let Ok(stored) = <&[u8; DIGEST_LEN]>::try_from(stored) else {
        return false;
    };
    let (equal, _) = accumulate_eq(candidate, stored);
    equal.into()
}

/// Fold byte-wise equality over the whole digest; returns the accumulated
/// result and the number of positions compared.
fn accumulate_eq(a: &[u8; DIGEST_LEN], b: &[u8; DIGEST_LEN]) -> (Choice, usize) {
    let mut equal = Choice::from(1u8);
    let mut scanned = 0usize;
    for (x, y) in a.iter().zip(b.iter()) {
        equal &= x.ct_eq(y);
        scanned += 1;
    }
    (equal, scanned)
}
