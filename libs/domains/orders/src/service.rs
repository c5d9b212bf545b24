//! Order Service - order intake

use std::sync::Arc;
use tracing::instrument;

use crate::error::OrderResult;
use crate::models::{OrderPayload, OrderReceipt};
use crate::repository::OrderRepository;

pub struct OrderService<R: OrderRepository> {
    repository: Arc<R>,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Persist the order as submitted
    #[instrument(skip(self, order))]
    pub async fn submit(&self, order: OrderPayload) -> OrderResult<OrderReceipt> {
        let inserted_id = self.repository.insert(order).await?;
        Ok(OrderReceipt::new(inserted_id))
    }
}

impl<R: OrderRepository> Clone for OrderService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
