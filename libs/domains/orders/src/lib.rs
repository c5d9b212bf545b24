//! Orders Domain
//!
//! Checkout posts an order document; it is stored verbatim in the `orders`
//! collection and acknowledged with the generated id.
//!
//! ```text
//! POST /orders ─▶ OrderService::submit ─▶ OrderRepository::insert ─▶ orders
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{OrderError, OrderResult};
pub use handlers::ApiDoc;
pub use models::{OrderPayload, OrderReceipt};
pub use mongodb::MongoOrderRepository;
pub use repository::{InMemoryOrderRepository, OrderRepository};
pub use service::OrderService;
