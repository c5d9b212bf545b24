//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use mongodb::{Collection, Database, IndexModel, bson::doc, options::IndexOptions};
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::User;
use crate::repository::UserRepository;

pub const COLLECTION_NAME: &str = "user";

/// MongoDB implementation of the UserRepository
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    /// Create a new MongoUserRepository
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<User>(COLLECTION_NAME);
        Self { collection }
    }

    /// Create a new MongoUserRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<User>(collection_name);
        Self { collection }
    }

    /// Create the unique index on `Email` that closes the register race.
    ///
    /// Fails if the collection already holds duplicate emails.
    pub async fn init_indexes(&self) -> UserResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "Email": 1 })
            .options(
                IndexOptions::builder()
                    .name("uniq_email".to_string())
                    .unique(true)
                    .build(),
            )
            .build();

        self.collection
            .create_index(index)
            .await
            .map_err(|e| UserError::Database(e.to_string()))?;
        tracing::info!("User indexes created successfully");
        Ok(())
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<User> {
        &self.collection
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let user = self.collection.find_one(doc! { "Email": email }).await?;
        Ok(user)
    }

    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn insert(&self, mut user: User) -> UserResult<User> {
        let result = self.collection.insert_one(&user).await?;
        user.id = result.inserted_id.as_object_id();

        tracing::info!(user_id = ?user.id, "Created user");
        Ok(user)
    }
}
