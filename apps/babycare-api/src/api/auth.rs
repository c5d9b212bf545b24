//! Registration and login routes

use axum::Router;
use axum_helpers::JwtAuth;
use domain_users::{AuthService, MongoUserRepository, handlers};
use tracing::info;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoUserRepository::new(&state.db);
    let jwt_auth = JwtAuth::new(&state.config.jwt);
    handlers::router(AuthService::new(repository, jwt_auth))
}

/// Unique index on `Email`
pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    MongoUserRepository::new(db)
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create user indexes: {}", e))?;
    info!("User collection indexes created");
    Ok(())
}
