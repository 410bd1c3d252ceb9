use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Fold a username for uniqueness checks and lookups.
pub fn normalize_username(username: &str) -> String {
    username.to_lowercase()
}

/// Registered account's durable credential record.
///
/// `password_hash` is always HMAC-SHA-512(password_salt, plaintext) as
/// computed at registration.
#[derive(Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub password_hash: Vec<u8>,
    pub password_salt: Vec<u8>,
}

impl Identity {
    pub fn normalized_username(&self) -> String {
        normalize_username(&self.username)
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("username", &self.username)
            .field("password_hash", &format_args!("<{} bytes>", self.password_hash.len()))
            .field("password_salt", &format_args!("<{} bytes>", self.password_salt.len()))
            .finish()
    }
}

/// Registration input
#[derive(Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct RegisterInput {
    pub username: String,
    pub password: String,
}

/// Login input
#[derive(Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

impl RegisterInput {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }
}

impl LoginInput {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }
}

impl fmt::Debug for RegisterInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterInput").field("username", &self.username).field("password", &"<redacted>").finish()
    }
}

impl fmt::Debug for LoginInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginInput").field("username", &self.username).field("password", &"<redacted>").finish()
    }
}

/// Outcome of a successful register or login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub username: String,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_folds_case_only() {
        assert_eq!(normalize_username("ALICE"), "alice");
        assert_eq!(normalize_username("Alice"), normalize_username("aLiCe"));
        assert_eq!(normalize_username(" bob "), " bob ");
    }

    #[test]
    fn debug_output_hides_secrets() {
        let input = LoginInput::new("bob", "hunter2");
        assert!(!format!("{input:?}").contains("hunter2"));

        let identity = Identity { username: "bob".into(), password_hash: vec![0xAB; 64], password_salt: vec![0xCD; 128] };
        let dbg = format!("{identity:?}");
        assert!(dbg.contains("<64 bytes>"));
        assert!(dbg.contains("<128 bytes>"));
    }

    #[test]
    fn inputs_deserialize_from_json() {
        let input: RegisterInput = serde_json::from_str(r#"{"username":"Bob","password":"pw"}"#).unwrap();
        assert_eq!(input.username, "Bob");
        assert_eq!(input.password, "pw");
    }
}
