//! HTTP routes for the storefront API.
//!
//! Every domain router carries its full paths, so everything merges at the root.

pub mod auth;
pub mod health;
pub mod orders;
pub mod products;
pub mod root;

use axum::Router;

use crate::state::AppState;

pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(root::router())
        .merge(auth::router(state))
        .merge(products::router(state))
        .merge(orders::router(state))
        .merge(health::router(state.clone()))
}

/// Create every index the routes rely on
pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    auth::init_indexes(db).await?;
    products::init_indexes(db).await?;
    Ok(())
}
