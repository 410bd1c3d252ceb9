use thiserror::Error;

/// Business errors for auth workflows.
///
/// `InvalidCredentials` covers both an unknown username and a wrong
/// password; callers must not be able to tell them apart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("username is taken")]
    UsernameTaken,
    #[error("credentials are invalid")]
    InvalidCredentials,
    #[error("repository error: {0}")]
    Repository(String),
    #[error("token error: {0}")]
    Token(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::UsernameTaken => 1002,
            AuthError::InvalidCredentials => 1004,
            AuthError::Token(_) => 1102,
            AuthError::Repository(_) => 1200,
        }
    }

    /// True for collaborator faults rather than outcomes of the flows.
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, AuthError::Repository(_) | AuthError::Token(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(AuthError::UsernameTaken.code(), 1002);
        assert_eq!(AuthError::InvalidCredentials.code(), 1004);
        assert_eq!(AuthError::Repository("x".into()).code(), 1200);
        assert_eq!(AuthError::Token("x".into()).code(), 1102);
    }

    #[test]
    fn only_collaborator_faults_are_infrastructure() {
        assert!(!AuthError::UsernameTaken.is_infrastructure());
        assert!(!AuthError::InvalidCredentials.is_infrastructure());
        assert!(AuthError::Repository("down".into()).is_infrastructure());
        assert!(AuthError::Token("bad key".into()).is_infrastructure());
    }
}
