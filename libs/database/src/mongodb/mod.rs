//! MongoDB connector and utilities
//!
//! Builds a pooled [`Client`] from [`MongoConfig`] and probes it with the
//! `ping` admin command. Connecting never talks to the server; the first
//! round trip happens on [`ping`] or on the first query.

mod config;
mod connector;
mod health;

pub use config::{DEFAULT_DATABASE, MongoConfig};
pub use connector::{client_options, connect, connect_from_config};
pub use health::ping;

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
