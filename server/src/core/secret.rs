//! Session signing key management
//!
//! The key comes from `ECOTRACK_SECRET_KEY` when set, otherwise a random
//! 256-bit key is generated once and stored hex-encoded in the data directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::constants::{ENV_SECRET_KEY, MIN_SECRET_KEY_LEN, SIGNING_KEY_FILENAME, SIGNING_KEY_LEN};
use super::storage::AppStorage;
use crate::utils::crypto;

/// Where the signing key is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretBackend {
    /// Supplied through the environment
    Env,
    /// Generated and persisted in the data directory
    File(PathBuf),
}

impl SecretBackend {
    /// Get a human-readable name for the backend
    pub fn name(&self) -> &'static str {
        match self {
            Self::Env => "environment",
            Self::File(_) => "file",
        }
    }
}

/// Signing key provider
pub struct SecretManager {
    backend: SecretBackend,
    env_value: Option<String>,
}

impl SecretManager {
    /// Detect the backend from the environment and the data directory
    pub fn init(storage: &AppStorage) -> Result<Self> {
        let env_value = std::env::var(ENV_SECRET_KEY).ok();
        Self::from_parts(storage, env_value)
    }

    fn from_parts(storage: &AppStorage, env_value: Option<String>) -> Result<Self> {
        let env_value = env_value.filter(|v| !v.trim().is_empty());

        let backend = match &env_value {
            Some(value) => {
                if value.len() < MIN_SECRET_KEY_LEN {
                    anyhow::bail!(
                        "{} must be at least {} characters long",
                        ENV_SECRET_KEY,
                        MIN_SECRET_KEY_LEN
                    );
                }
                SecretBackend::Env
            }
            None => SecretBackend::File(storage.data_path(SIGNING_KEY_FILENAME)),
        };

        tracing::debug!(backend = backend.name(), "Secret manager initialized");
        Ok(Self { backend, env_value })
    }

    pub fn backend(&self) -> &SecretBackend {
        &self.backend
    }

    /// Get the session signing key, creating it if it doesn't exist
    pub async fn get_signing_key(&self) -> Result<Vec<u8>> {
        match (&self.backend, &self.env_value) {
            (SecretBackend::Env, Some(value)) => Ok(value.as_bytes().to_vec()),
            (SecretBackend::Env, None) => anyhow::bail!("{} is not set", ENV_SECRET_KEY),
            (SecretBackend::File(path), _) => Self::load_or_create(path).await,
        }
    }

    async fn load_or_create(path: &Path) -> Result<Vec<u8>> {
        match tokio::fs::read_to_string(path).await {
            Ok(key_hex) => {
                if let Ok(key) = crypto::decode_hex(key_hex.trim())
                    && key.len() == SIGNING_KEY_LEN
                {
                    return Ok(key);
                }
                tracing::warn!("Stored signing key has invalid format, regenerating");
                Self::create(path).await
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::create(path).await,
            Err(e) => {
                Err(e).with_context(|| format!("Failed to read signing key: {}", path.display()))
            }
        }
    }

    async fn create(path: &Path) -> Result<Vec<u8>> {
        let key = crypto::generate_signing_key();

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("Failed to create secrets directory")?;
        }

        tokio::fs::write(path, crypto::encode_hex(&key))
            .await
            .with_context(|| format!("Failed to write signing key: {}", path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
                .await
                .context("Failed to restrict signing key permissions")?;
        }

        tracing::debug!(path = %path.display(), "Created new signing key");
        Ok(key)
    }
}
