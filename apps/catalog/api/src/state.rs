//! Application state management.
//!
//! This module defines the shared application state passed to all request
//! handlers: configuration plus the MongoDB client handle.

/// Shared application state.
///
/// This struct is cloned for each handler (inexpensive handle clones),
/// providing access to:
/// - Application configuration
/// - MongoDB client (cloneable, shares the underlying connection pool)
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client handle
    pub mongo: database::mongodb::Client,
}
