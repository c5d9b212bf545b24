use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{OrderError, OrderResult};
use crate::models::OrderPayload;

/// Write access to the `orders` collection
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Store the order and return its `_id` rendered as JSON
    async fn insert(&self, order: OrderPayload) -> OrderResult<Value>;
}

/// In-memory implementation of OrderRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<Vec<OrderPayload>>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything stored so far, `_id` included
    pub async fn orders(&self) -> Vec<OrderPayload> {
        self.orders.read().await.clone()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn insert(&self, mut order: OrderPayload) -> OrderResult<Value> {
        let mut orders = self.orders.write().await;

        let id = match order.get("_id") {
            Some(id) => {
                if orders.iter().any(|o| o.get("_id") == Some(id)) {
                    return Err(OrderError::DuplicateId(id.to_string()));
                }
                id.clone()
            }
            None => {
                let id = Value::String(ObjectId::new().to_hex());
                order.insert("_id".to_string(), id.clone());
                id
            }
        };

        orders.push(order);
        Ok(id)
    }
}
