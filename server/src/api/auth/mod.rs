//! Authentication module

mod extractors;
pub mod jwt;
mod manager;
pub mod middleware;

pub use extractors::{AuthRejection, AuthUser};
pub use jwt::SessionClaims;
pub use manager::AuthManager;
pub use middleware::{AuthError, AuthState, require_auth};
