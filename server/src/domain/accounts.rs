//! Account registration and login
//!
//! Passwords are hashed with Argon2 on the blocking pool. Successful calls
//! return a session token minted by the configured `SessionIssuer`.

use std::sync::Arc;

use super::error::DomainError;
use crate::data::{DataError, TransactionalService};
use crate::utils::password;

const MISSING_FIELDS: &str = "Faltan campos (email, password)";
const INVALID_EMAIL: &str = "El correo electrónico no es válido.";
const EMAIL_TAKEN: &str = "El correo electrónico ya está registrado.";
const INVALID_CREDENTIALS: &str = "Credenciales inválidas.";
const REGISTER_FAILED: &str = "Error al registrar usuario.";
const LOGIN_FAILED: &str = "Error al iniciar sesión.";
const SESSION_FAILED: &str = "Error al crear la sesión.";

/// Mints session tokens for authenticated users
pub trait SessionIssuer: Send + Sync {
    fn issue(&self, user_id: i64) -> Result<String, String>;
}

pub struct AccountService {
    database: Arc<TransactionalService>,
    sessions: Arc<dyn SessionIssuer>,
}

impl AccountService {
    pub fn new(database: Arc<TransactionalService>, sessions: Arc<dyn SessionIssuer>) -> Self {
        Self { database, sessions }
    }

    /// Create an account and return a session token for it
    ///
    /// The username is the local part of the email.
    pub async fn register(&self, email: &str, password: &str) -> Result<String, DomainError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(DomainError::Validation(MISSING_FIELDS.to_string()));
        }
        let username = match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => local,
            _ => return Err(DomainError::Validation(INVALID_EMAIL.to_string())),
        };

        let password_hash = hash_blocking(password.to_string()).await?;

        let user = self
            .database
            .repository()
            .create_user(email, username, &password_hash)
            .await
            .map_err(|e| match e {
                DataError::Conflict(_) => DomainError::Conflict(EMAIL_TAKEN.to_string()),
                other => DomainError::from_data(other, REGISTER_FAILED),
            })?;

        tracing::info!(user_id = user.id, %username, "User registered");
        self.issue(user.id)
    }

    /// Verify credentials and return a fresh session token
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, DomainError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(DomainError::Validation(MISSING_FIELDS.to_string()));
        }

        let credentials = self
            .database
            .repository()
            .get_user_credentials_by_email(email)
            .await
            .map_err(|e| DomainError::from_data(e, LOGIN_FAILED))?;

        let Some(credentials) = credentials else {
            tracing::debug!("Login for unknown email");
            return Err(DomainError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        let candidate = password.to_string();
        let stored = credentials.password_hash;
        let valid =
            tokio::task::spawn_blocking(move || password::verify_password(&candidate, &stored))
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, "Password verification task failed");
                    DomainError::Internal(LOGIN_FAILED.to_string())
                })?;

        if !valid {
            tracing::debug!(user_id = credentials.id, "Login with wrong password");
            return Err(DomainError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        self.issue(credentials.id)
    }

    fn issue(&self, user_id: i64) -> Result<String, DomainError> {
        self.sessions.issue(user_id).map_err(|e| {
            tracing::error!(user_id, error = %e, "Failed to issue session token");
            DomainError::Internal(SESSION_FAILED.to_string())
        })
    }
}

async fn hash_blocking(password: String) -> Result<String, DomainError> {
    tokio::task::spawn_blocking(move || password::hash_password(&password))
        .await
        .map_err(|e| e.to_string())
        .and_then(|r| r)
        .map_err(|e| {
            tracing::error!(error = %e, "Password hashing failed");
            DomainError::Internal(REGISTER_FAILED.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PlainIssuer;

    impl SessionIssuer for PlainIssuer {
        fn issue(&self, user_id: i64) -> Result<String, String> {
            Ok(format!("token-{user_id}"))
        }
    }

    async fn service() -> AccountService {
        AccountService::new(TransactionalService::in_memory().await, Arc::new(PlainIssuer))
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let accounts = service().await;

        let token = accounts.register("a@b.com", "x").await.unwrap();
        assert_eq!(token, "token-1");

        let token = accounts.login("a@b.com", "x").await.unwrap();
        assert_eq!(token, "token-1");
    }

    #[tokio::test]
    async fn test_register_sets_username_from_email() {
        let accounts = service().await;
        accounts.register("maria.lopez@eco.es", "pw").await.unwrap();

        let user = accounts
            .database
            .repository()
            .get_user(1)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.username, "maria.lopez");
        assert_eq!(user.points, 0);
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let accounts = service().await;
        accounts.register("a@b.com", "x").await.unwrap();

        let err = accounts.register("a@b.com", "y").await.unwrap_err();
        assert_eq!(err, DomainError::Conflict(EMAIL_TAKEN.to_string()));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(accounts.database.pool())
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_register_missing_fields() {
        let accounts = service().await;
        assert!(matches!(
            accounts.register("", "x").await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            accounts.register("a@b.com", "").await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            accounts.register("no-at-sign", "x").await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials_uniformly() {
        let accounts = service().await;
        accounts.register("a@b.com", "x").await.unwrap();

        let wrong_password = accounts.login("a@b.com", "nope").await.unwrap_err();
        let unknown_email = accounts.login("z@b.com", "x").await.unwrap_err();
        assert_eq!(wrong_password, unknown_email);
        assert_eq!(
            wrong_password,
            DomainError::Unauthorized(INVALID_CREDENTIALS.to_string())
        );
    }
}
