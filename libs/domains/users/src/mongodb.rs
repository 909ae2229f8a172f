//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{Bson, doc, to_bson},
};
use std::collections::HashMap;
use tracing::instrument;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::{User, UserSummary};
use crate::repository::UserRepository;

/// MongoDB implementation of the UserRepository
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    /// Create a new MongoUserRepository reading the `users` collection
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<User>("users");
        Self { collection }
    }

    /// Create a new MongoUserRepository with a custom collection name
    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<User>(collection_name);
        Self { collection }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn insert(&self, user: &User) -> UserResult<()> {
        self.collection.insert_one(user).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_summary(&self, id: Uuid) -> UserResult<Option<UserSummary>> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let user = self.collection.find_one(filter).await?;
        Ok(user.map(UserSummary::from))
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn find_summaries(&self, ids: &[Uuid]) -> UserResult<HashMap<Uuid, UserSummary>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let id_values: Vec<Bson> = ids
            .iter()
            .map(|id| to_bson(id).unwrap_or(Bson::Null))
            .collect();
        let filter = doc! { "_id": { "$in": id_values } };

        let cursor = self.collection.find(filter).await?;
        let users: Vec<User> = cursor.try_collect().await?;

        Ok(users
            .into_iter()
            .map(|u| (u.id, UserSummary::from(u)))
            .collect())
    }
}
