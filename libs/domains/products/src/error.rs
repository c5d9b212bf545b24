use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(ObjectId),

    #[error("Invalid product id: {0}")]
    InvalidIdentifier(String),

    #[error("Query parameter '{param}' must be a number, got '{value}'")]
    InvalidQuery { param: &'static str, value: String },

    #[error("Database error: {0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// A stored document that cannot be read as a product at all
#[derive(Debug, Error)]
#[error("Malformed product document: {0}")]
pub struct MalformedProduct(pub String);

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => AppError::NotFound(format!("Product {} not found", id)),
            ProductError::InvalidIdentifier(id) => AppError::InvalidObjectId(id),
            err @ ProductError::InvalidQuery { .. } => AppError::InvalidQuery(err.to_string()),
            ProductError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}
