//! Token issuing for the login flow.
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig};
//! use core_config::FromEnv;
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//! let token = auth.issue_token("ada@example.com")?;
//! let claims = auth.verify_token(&token)?;
//! ```

pub mod config;
pub mod jwt;

pub use config::{DEFAULT_EXPIRES_IN, JwtConfig, parse_expires_in};
pub use jwt::{JwtAuth, JwtClaims};
