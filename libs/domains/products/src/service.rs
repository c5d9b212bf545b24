//! Product Service - catalog reads behind the HTTP layer

use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductFilter, ProductQuery};
use crate::repository::ProductRepository;

/// Product service translating requests into catalog lookups
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List products matching the `category`, `rating` and `price` parameters
    #[instrument(skip(self))]
    pub async fn list_products(&self, query: ProductQuery) -> ProductResult<Vec<Product>> {
        let filter = ProductFilter::try_from(query)?;
        self.repository.find(filter).await
    }

    /// Look up by a raw id string, returning zero or one products.
    ///
    /// The id is validated before the catalog is touched.
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: &str) -> ProductResult<Vec<Product>> {
        let id = ObjectId::parse_str(id)
            .map_err(|_| ProductError::InvalidIdentifier(id.to_string()))?;

        Ok(self.repository.find_by_id(id).await?.into_iter().collect())
    }

    /// Get a single product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ObjectId) -> ProductResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Flash-sale products, oldest first
    #[instrument(skip(self))]
    pub async fn flash_sale(&self) -> ProductResult<Vec<Product>> {
        self.repository.find_flash_sale().await
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
