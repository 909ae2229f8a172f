//! Users Domain
//!
//! Read-side access to the `users` collection. Account lifecycle belongs to
//! the external identity provider; the catalog only resolves author and
//! reviewer references to a small projection of user fields.

pub mod error;
pub mod models;
pub mod mongodb;
pub mod repository;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use models::{User, UserSummary};
pub use mongodb::MongoUserRepository;
pub use repository::UserRepository;
