//! Authentication manager

use anyhow::Result;

use super::jwt::{JwtError, SessionClaims, create_session_token, validate_session_token};
use crate::core::SecretManager;
use crate::domain::SessionIssuer;

/// Issues and validates session tokens
#[derive(Debug)]
pub struct AuthManager {
    signing_key: Vec<u8>,
    session_ttl_days: u32,
}

impl AuthManager {
    /// Initialize the authentication manager
    pub async fn init(secrets: &SecretManager, session_ttl_days: u32) -> Result<Self> {
        let signing_key = secrets.get_signing_key().await?;
        tracing::debug!(
            backend = secrets.backend().name(),
            session_ttl_days,
            "Authentication initialized"
        );
        Ok(Self::new(signing_key, session_ttl_days))
    }

    pub fn new(signing_key: Vec<u8>, session_ttl_days: u32) -> Self {
        Self {
            signing_key,
            session_ttl_days,
        }
    }

    /// Create a session token for a user
    pub fn create_session(&self, user_id: i64) -> Result<String, JwtError> {
        create_session_token(&self.signing_key, user_id, self.session_ttl_days)
    }

    /// Validate a JWT session token
    pub fn validate_session(&self, jwt: &str) -> Result<SessionClaims, JwtError> {
        validate_session_token(jwt, &self.signing_key)
    }
}

impl SessionIssuer for AuthManager {
    fn issue(&self, user_id: i64) -> Result<String, String> {
        self.create_session(user_id).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_then_validate() {
        let manager = AuthManager::new(vec![3u8; 32], 30);
        let token = manager.issue(9).unwrap();
        let claims = manager.validate_session(&token).unwrap();
        assert_eq!(claims.user_id().unwrap(), 9);
    }

    #[test]
    fn test_tokens_from_other_key_rejected() {
        let ours = AuthManager::new(vec![3u8; 32], 30);
        let theirs = AuthManager::new(vec![4u8; 32], 30);
        let token = theirs.create_session(9).unwrap();
        assert!(ours.validate_session(&token).is_err());
    }
}
