//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Collection, Cursor, Database, IndexModel,
    bson::{Document, doc, oid::ObjectId},
    options::IndexOptions,
};
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::{Product, ProductFilter};
use crate::repository::ProductRepository;

pub const COLLECTION_NAME: &str = "products";

/// MongoDB implementation of the ProductRepository
///
/// Reads raw documents and decodes them one by one, so a single unreadable
/// product is logged and skipped instead of failing the whole listing.
pub struct MongoProductRepository {
    collection: Collection<Document>,
}

impl MongoProductRepository {
    /// Create a new MongoProductRepository
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Document>(COLLECTION_NAME);
        Self { collection }
    }

    /// Create a new MongoProductRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Document>(collection_name);
        Self { collection }
    }

    /// Initialize indexes backing the listing filters and the flash-sale query
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let indexes = vec![
            // Category listing with rating/price bounds
            IndexModel::builder()
                .keys(doc! { "category": 1, "price": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_category_price".to_string())
                        .build(),
                )
                .build(),
            // Flash sale, oldest first
            IndexModel::builder()
                .keys(doc! { "isFlash": 1, "createdAt": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_flash_created_at".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Document> {
        &self.collection
    }
}

fn decode(document: Document) -> Option<Product> {
    let id = document.get("_id").cloned();
    Product::try_from(document)
        .inspect_err(|e| tracing::warn!(?id, error = %e, "Skipping unreadable product"))
        .ok()
}

async fn collect_products(cursor: Cursor<Document>) -> ProductResult<Vec<Product>> {
    let documents: Vec<Document> = cursor.try_collect().await?;
    Ok(documents.into_iter().filter_map(decode).collect())
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self))]
    async fn find(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let cursor = self.collection.find(filter.to_document()).await?;
        let products = collect_products(cursor).await?;

        tracing::debug!(count = products.len(), "Products listed");
        Ok(products)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>> {
        let document = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(document.and_then(decode))
    }

    #[instrument(skip(self))]
    async fn find_flash_sale(&self) -> ProductResult<Vec<Product>> {
        let cursor = self
            .collection
            .find(doc! { "isFlash": true })
            .sort(doc! { "createdAt": 1 })
            .await?;

        collect_products(cursor).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use mongodb::{Client, bson::DateTime};

    async fn repository() -> (MongoProductRepository, Collection<Document>) {
        let url = std::env::var("MONGODB_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let client = Client::with_uri_str(&url).await.unwrap();
        let db = client.database("babycare_products_test");
        let name = ObjectId::new().to_hex();
        let repo = MongoProductRepository::with_collection(&db, &name);
        repo.init_indexes().await.unwrap();
        (repo, db.collection::<Document>(&name))
    }

    // Stored the way the storefront admin writes products: native ObjectId and date.
    fn stored(product: &Product) -> Document {
        doc! {
            "_id": product.id,
            "category": product.category.clone(),
            "price": product.price,
            "rating": product.rating,
            "isFlash": product.is_flash_sale(),
            "createdAt": product.created_at.map(|at| DateTime::from_millis(at.timestamp_millis())),
            "name": "Sample",
        }
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_find_applies_filter_document() {
        let (repo, raw) = repository().await;
        let cheap_toy = Product::new("toys", 20.0, 4.0);
        let pricey_toy = Product::new("toys", 80.0, 4.0);
        let bath = Product::new("bath", 10.0, 5.0);
        raw.insert_many([stored(&cheap_toy), stored(&pricey_toy), stored(&bath)])
            .await
            .unwrap();

        let filter = ProductFilter {
            category: Some("toys".to_string()),
            min_rating: None,
            max_price: Some(50.0),
        };
        let found = repo.find(filter).await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, cheap_toy.id);
        assert!(found[0].extra.contains_key("name"));

        let by_id = repo.find_by_id(bath.id).await.unwrap().unwrap();
        assert_eq!(by_id.category.as_deref(), Some("bath"));

        raw.drop().await.unwrap();
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_flash_sale_order() {
        let (repo, raw) = repository().await;
        let later = Product::new("toys", 20.0, 4.0)
            .flash()
            .created(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
        let earlier = Product::new("toys", 20.0, 4.0)
            .flash()
            .created(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let regular = Product::new("toys", 20.0, 4.0);
        raw.insert_many([stored(&later), stored(&regular), stored(&earlier)])
            .await
            .unwrap();

        let ids: Vec<_> = repo
            .find_flash_sale()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();

        assert_eq!(ids, vec![earlier.id, later.id]);
        raw.drop().await.unwrap();
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_loose_documents_are_listed_and_unreadable_ones_skipped() {
        let (repo, raw) = repository().await;
        let loose_id = ObjectId::new();
        raw.insert_many([
            doc! {
                "_id": loose_id,
                "category": "toys",
                "price": "12.99",
                "isFlash": true,
                "createdAt": "2024-05-01",
            },
            doc! { "_id": "legacy-slug", "category": "toys", "isFlash": true },
        ])
        .await
        .unwrap();

        let listed = repo.find(ProductFilter::default()).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, loose_id);
        assert_eq!(listed[0].price, Some(12.99));

        let flash = repo.find_flash_sale().await.unwrap();
        assert_eq!(flash.len(), 1);

        raw.drop().await.unwrap();
    }
}
