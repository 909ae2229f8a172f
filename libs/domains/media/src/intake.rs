use async_trait::async_trait;

use crate::error::IntakeResult;

/// Narrow interface to the image storage collaborator.
///
/// Payloads are either `data:` URLs (stored and replaced by a generated
/// location) or already-hosted `http(s)` URLs (passed through unchanged).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageIntake: Send + Sync {
    /// Store each payload and return its stored-location identifier,
    /// in input order.
    async fn store(&self, payloads: &[String]) -> IntakeResult<Vec<String>>;
}
