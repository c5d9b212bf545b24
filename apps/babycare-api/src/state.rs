//! Shared application state.

use mongodb::{Client, Database};

/// Built once in `main` and handed to every route module.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// Connection pool; dropped during graceful shutdown
    pub mongo_client: Client,
    /// The storefront database (`user`, `products`, `orders`)
    pub db: Database,
}
