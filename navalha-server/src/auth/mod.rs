//! Authentication module
//!
//! JWT auth for the owner dashboard:
//! - [`JwtService`] - token issuing and validation
//! - [`CurrentUser`] - authenticated owner context
//! - [`require_auth`] - middleware guarding `/api/` routes
//! - [`password`] - argon2 hashing for stored credentials

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{CurrentUserExt, require_auth};
pub use password::{hash_password, verify_password};
