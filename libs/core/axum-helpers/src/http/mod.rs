//! HTTP middleware shared by the workspace binaries.

mod security;

pub use security::security_headers;
