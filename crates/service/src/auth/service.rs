use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{normalize_username, AuthSession, Identity, LoginInput, RegisterInput};
use super::errors::AuthError;
use super::hasher::hash_password;
use super::repository::{CreateOutcome, UserStore};
use super::token::TokenIssuer;
use super::verifier::verify_password;

/// Auth business service independent of web framework
pub struct AuthService<S: UserStore + ?Sized, T: TokenIssuer + ?Sized> {
    store: Arc<S>,
    issuer: Arc<T>,
}

impl<S: UserStore + ?Sized, T: TokenIssuer + ?Sized> AuthService<S, T> {
    pub fn new(store: Arc<S>, issuer: Arc<T>) -> Self { Self { store, issuer } }

    /// Register a new identity with a freshly salted password hash.
    ///
    /// The token is issued before the identity is written so that any
    /// failure leaves the store untouched.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::AuthService, repository::mock::InMemoryUserStore, token::JwtTokenIssuer};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(InMemoryUserStore::default()), Arc::new(JwtTokenIssuer::new("secret", 12).unwrap()));
    /// let session = tokio_test::block_on(svc.register(RegisterInput::new("Alice", "s3cret"))).unwrap();
    /// assert_eq!(session.username, "Alice");
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthSession, AuthError> {
        let normalized = normalize_username(&input.username);
        if self.store.find_by_username(&normalized).await?.is_some() {
            debug!("username already registered");
            return Err(AuthError::UsernameTaken);
        }

        let hashed = hash_password(input.password.as_bytes(), None);
        let identity = Identity {
            username: input.username.clone(),
            password_hash: hashed.hash.to_vec(),
            password_salt: hashed.salt,
        };
        let token = self.issuer.issue(&identity).await?;

        match self.store.create_if_absent(&identity).await? {
            CreateOutcome::Created => {}
            CreateOutcome::Conflict => {
                debug!("lost registration race for username");
                return Err(AuthError::UsernameTaken);
            }
        }

        info!(username = %identity.username, "account_registered");
        Ok(AuthSession { username: identity.username, token })
    }

    /// Verify credentials and issue a token.
    ///
    /// Unknown usernames and wrong passwords both fail with
    /// `AuthError::InvalidCredentials`.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::AuthService, repository::mock::InMemoryUserStore, token::JwtTokenIssuer};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(InMemoryUserStore::default()), Arc::new(JwtTokenIssuer::new("secret", 12).unwrap()));
    /// let _ = tokio_test::block_on(svc.register(RegisterInput::new("alice", "Passw0rd")));
    /// let session = tokio_test::block_on(svc.login(LoginInput::new("ALICE", "Passw0rd"))).unwrap();
    /// assert_eq!(session.username, "alice");
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let normalized = normalize_username(&input.username);
        let Some(identity) = self.store.find_by_username(&normalized).await? else {
            debug!("login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(input.password.as_bytes(), &identity.password_hash, &identity.password_salt) {
            debug!("login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.issuer.issue(&identity).await?;
        debug!("login accepted");
        Ok(AuthSession { username: identity.username, token })
    }
}
