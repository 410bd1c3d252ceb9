//! Token issuing collaborator.
//!
//! The flows treat tokens as opaque strings. `JwtTokenIssuer` is the
//! HS256 implementation wired into the server.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header as JwtHeader};
use serde::{Deserialize, Serialize};

use super::domain::Identity;
use super::errors::AuthError;

/// Produces an opaque token for a verified identity.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    async fn issue(&self, identity: &Identity) -> Result<String, AuthError>;
}

/// Claims carried by issued JWTs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
}

/// HS256 JWT issuer keyed by a shared secret.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    key: EncodingKey,
    ttl: Duration,
}

impl JwtTokenIssuer {
    /// Fails when `ttl_hours` does not fit a `chrono::Duration`.
    pub fn new(secret: &str, ttl_hours: i64) -> Result<Self, AuthError> {
        let ttl = Duration::try_hours(ttl_hours)
            .ok_or_else(|| AuthError::Token(format!("token ttl of {ttl_hours} hours is out of range")))?;
        Ok(Self { key: EncodingKey::from_secret(secret.as_bytes()), ttl })
    }
}

#[async_trait]
impl TokenIssuer for JwtTokenIssuer {
    async fn issue(&self, identity: &Identity) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: identity.username.clone(),
            iat: now.timestamp() as usize,
            exp: (now + self.ttl).timestamp() as usize,
        };
        encode(&JwtHeader::default(), &claims, &self.key).map_err(|e| AuthError::Token(e.to_string()))
    }
}
