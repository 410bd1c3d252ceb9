use async_trait::async_trait;

use super::domain::Identity;
use super::errors::AuthError;

/// Result of an atomic create-if-absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    /// Another identity already holds the normalized username.
    Conflict,
}

/// Persistence abstraction for identities.
///
/// Implementations own username uniqueness: `create_if_absent` must be a
/// single atomic step keyed by the normalized username.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, normalized_username: &str) -> Result<Option<Identity>, AuthError>;
    async fn create_if_absent(&self, identity: &Identity) -> Result<CreateOutcome, AuthError>;
}

/// Simple in-memory store for tests, benches and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct InMemoryUserStore {
        users: Mutex<HashMap<String, Identity>>, // key: normalized username
    }

    impl InMemoryUserStore {
        /// Number of stored identities.
        pub fn len(&self) -> usize {
            self.users.lock().map(|u| u.len()).unwrap_or_default()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }
    }

    #[async_trait]
    impl UserStore for InMemoryUserStore {
        async fn find_by_username(&self, normalized_username: &str) -> Result<Option<Identity>, AuthError> {
            let users = self.users.lock().map_err(|_| AuthError::Repository("user map lock poisoned".into()))?;
            Ok(users.get(normalized_username).cloned())
        }

        async fn create_if_absent(&self, identity: &Identity) -> Result<CreateOutcome, AuthError> {
            let mut users = self.users.lock().map_err(|_| AuthError::Repository("user map lock poisoned".into()))?;
            let key = identity.normalized_username();
            if users.contains_key(&key) {
                return Ok(CreateOutcome::Conflict);
            }
            users.insert(key, identity.clone());
            Ok(CreateOutcome::Created)
        }
    }
}
