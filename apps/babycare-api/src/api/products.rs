//! Catalog routes

use axum::Router;
use domain_products::{MongoProductRepository, ProductService, handlers};
use tracing::info;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoProductRepository::new(&state.db);
    handlers::router(ProductService::new(repository))
}

/// Indexes behind the listing filters and the flash-sale sort
pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    MongoProductRepository::new(db)
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create product indexes: {}", e))?;
    info!("Product collection indexes created");
    Ok(())
}
