use async_trait::async_trait;
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::{User, UserSummary};

/// Repository trait for read-side User access.
///
/// The catalog never mutates users beyond `insert`, which exists for test
/// seeding and local fixtures; account lifecycle is the identity provider's.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user record (test seeding / fixtures)
    async fn insert(&self, user: &User) -> UserResult<()>;

    /// Resolve a single reference to its projection.
    ///
    /// Returns `None` for dangling references - they are tolerated.
    async fn find_summary(&self, id: Uuid) -> UserResult<Option<UserSummary>>;

    /// Batch-resolve references to projections, keyed by user id.
    ///
    /// Missing ids are simply absent from the map.
    async fn find_summaries(&self, ids: &[Uuid]) -> UserResult<HashMap<Uuid, UserSummary>>;
}
