//! Database library providing the MongoDB connector and health checks
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB support
//! - `config` (default) - `MongoConfig::from_env` via `core_config::FromEnv`
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb;
//!
//! let config = mongodb::MongoConfig::with_database("mongodb://localhost:27017", "BabyCare-8");
//! let client = mongodb::connect_from_config(&config).await?;
//! let db = client.database(config.database());
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult};
