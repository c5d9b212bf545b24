use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::User;

/// Credential store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a user by exact email
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// Store a new user, returning it with its assigned id.
    ///
    /// Fails with `DuplicateUser` when the email is already taken.
    async fn insert(&self, user: User) -> UserResult<User>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(email).cloned())
    }

    async fn insert(&self, mut user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.email) {
            return Err(UserError::DuplicateUser);
        }

        let id = *user.id.get_or_insert_with(ObjectId::new);
        users.insert(user.email.clone(), user.clone());

        tracing::info!(user_id = %id, email = %user.email, "Created user");
        Ok(user)
    }
}
