//! Core application infrastructure

pub(crate) mod banner;
pub mod cli;
pub mod config;
pub mod constants;
pub mod secret;
pub mod shutdown;
pub mod storage;

pub use crate::app::CoreApp;
pub use cli::{CliConfig, Commands};
pub use config::{AppConfig, AuthConfig, ChallengesConfig, ServerConfig};
pub use secret::{SecretBackend, SecretManager};
pub use shutdown::ShutdownService;
pub use storage::{AppStorage, DataSubdir};

// Re-export the database service from the data layer
pub use crate::data::{SqliteService, TransactionalService};
