use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ProductResult;
use crate::models::{Product, ProductFilter};

/// Read access to the product catalog
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Products matching every constraint in `filter`, in storage order
    async fn find(&self, filter: ProductFilter) -> ProductResult<Vec<Product>>;

    /// Get a product by ID
    async fn find_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>>;

    /// Products flagged `isFlash`, oldest `createdAt` first
    async fn find_flash_sale(&self) -> ProductResult<Vec<Product>>;
}

/// In-memory catalog (for development/testing)
///
/// Keeps insertion order so `find` behaves like an unsorted collection scan.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<Vec<Product>>>,
    index: Arc<RwLock<HashMap<ObjectId, usize>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the catalog. Re-inserting an existing id replaces it in place.
    pub async fn insert(&self, product: Product) {
        let mut products = self.products.write().await;
        let mut index = self.index.write().await;

        match index.get(&product.id) {
            Some(&slot) => products[slot] = product,
            None => {
                index.insert(product.id, products.len());
                products.push(product);
            }
        }
    }

    pub async fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let repo = Self::new();
        for product in products {
            repo.insert(product).await;
        }
        repo
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        let index = self.index.read().await;
        Ok(index.get(&id).map(|&slot| products[slot].clone()))
    }

    async fn find_flash_sale(&self) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        let mut flash: Vec<Product> = products
            .iter()
            .filter(|p| p.is_flash_sale())
            .cloned()
            .collect();

        // MongoDB sorts a missing createdAt before any date; None < Some matches that.
        flash.sort_by_key(|p| p.created_at);
        Ok(flash)
    }
}
