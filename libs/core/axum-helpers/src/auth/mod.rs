//! JWT authentication for admin-gated catalog mutations.
//!
//! Token issuance lives with the external identity provider; this module
//! only verifies signatures, expiry, and role claims. Token minting is
//! still exposed for integration tests and local tooling.

mod config;
mod jwt;
mod middleware;

pub use config::JwtConfig;
pub use jwt::{ACCESS_TOKEN_TTL, JwtAuth, JwtClaims};
pub use middleware::{require_admin, require_auth};
