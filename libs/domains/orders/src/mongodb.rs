//! MongoDB implementation of OrderRepository

use async_trait::async_trait;
use mongodb::{
    Collection, Database,
    bson::{self, Document},
};
use serde_json::Value;
use tracing::instrument;

use crate::error::{OrderError, OrderResult, is_duplicate_key};
use crate::models::{OrderPayload, inserted_id_to_json};
use crate::repository::OrderRepository;

pub const COLLECTION_NAME: &str = "orders";

/// MongoDB implementation of the OrderRepository
pub struct MongoOrderRepository {
    collection: Collection<Document>,
}

impl MongoOrderRepository {
    /// Create a new MongoOrderRepository
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Document>(COLLECTION_NAME);
        Self { collection }
    }

    /// Create a new MongoOrderRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Document>(collection_name);
        Self { collection }
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Document> {
        &self.collection
    }
}

#[async_trait]
impl OrderRepository for MongoOrderRepository {
    #[instrument(skip(self, order), fields(fields = order.len()))]
    async fn insert(&self, order: OrderPayload) -> OrderResult<Value> {
        let document =
            bson::to_document(&order).map_err(|e| OrderError::Encoding(e.to_string()))?;
        let caller_id = document.get("_id").cloned();

        let result = self.collection.insert_one(document).await.map_err(|e| {
            if is_duplicate_key(&e) {
                let id = caller_id
                    .map(|id| id.to_string())
                    .unwrap_or_default();
                OrderError::DuplicateId(id)
            } else {
                OrderError::from(e)
            }
        })?;

        let id = inserted_id_to_json(result.inserted_id);
        tracing::info!(order_id = %id, "Order stored");
        Ok(id)
    }
}
