//! Users Domain
//!
//! Account registration and login for the storefront.
//!
//! ```text
//! ┌──────────────┐
//! │   Handlers   │  POST /api/v1/register, POST /api/v1/login
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐   ┌────────────┐
//! │ AuthService  │──▶│  password  │  Argon2id hash / verify (blocking pool)
//! └──────┬───────┘   └────────────┘
//!        │ JwtAuth issues the login token
//! ┌──────▼───────┐
//! │  Repository  │  `user` collection, unique on Email
//! └──────────────┘
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod password;
pub mod repository;
pub mod service;

pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, User};
pub use mongodb::MongoUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::AuthService;
