//! Order intake route

use axum::Router;
use domain_orders::{MongoOrderRepository, OrderService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoOrderRepository::new(&state.db);
    handlers::router(OrderService::new(repository))
}
