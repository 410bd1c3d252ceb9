//! HMAC-SHA-512 password hashing with a per-identity random key.
//!
//! The salt is the HMAC key itself. A fresh salt is the SHA-512 block size
//! (128 bytes), the native key size for this construction.

use std::fmt;

use hmac::{digest::KeyInit, Hmac, Mac};
use rand::{rngs::OsRng, RngCore};
use sha2::Sha512;

type HmacSha512 = Hmac<Sha512>;

/// Size of a password digest in bytes.
pub const DIGEST_LEN: usize = 64;

/// Size of a freshly generated salt in bytes.
pub const SALT_LEN: usize = 128;

/// A digest together with the salt that produced it.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    pub hash: [u8; DIGEST_LEN],
    pub salt: Vec<u8>,
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HashedPassword({:02x}{:02x}.., salt: {} bytes)", self.hash[0], self.hash[1], self.salt.len())
    }
}

/// Hash `plaintext` under `salt`, generating a random salt when none is given.
///
/// The returned salt is the one actually used so it can be stored and
/// handed back for verification. Empty plaintexts are hashed like any other.
pub fn hash_password(plaintext: &[u8], salt: Option<&[u8]>) -> HashedPassword {
    let salt = match salt {
        Some(s) => s.to_vec(),
        None => generate_salt(),
    };
    let hash = keyed_digest(&salt, plaintext);
    HashedPassword { hash, salt }
}

/// Cryptographically random salt of `SALT_LEN` bytes.
pub fn generate_salt() -> Vec<u8> {
    let mut salt = vec![0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}

fn keyed_digest(key: &[u8], message: &[u8]) -> [u8; DIGEST_LEN] {
    let mut mac = <HmacSha512 as KeyInit>::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(message);
    let mut digest = [0u8; DIGEST_LEN];
    digest.copy_from_slice(&mac.finalize().into_bytes());
    digest
}
