//! Error codes carried in every [`ErrorResponse`](super::ErrorResponse).
//!
//! A code has a client-facing identifier, a numeric value for log queries
//! and a default message:
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::InvalidQuery;
//! assert_eq!(code.as_str(), "INVALID_QUERY");
//! assert_eq!(code.code(), 1009);
//! ```
//!
//! Numbering: 1xxx request problems and generic server faults, 2xxx storage.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Path segment is not a 24-character hex ObjectId
    InvalidObjectId,
    /// Body missing, not JSON, or the wrong JSON shape
    JsonExtraction,
    NotFound,
    InternalError,
    /// Write collided with a unique key
    Conflict,
    /// Query string value could not be interpreted
    InvalidQuery,
    BadRequest,
    /// MongoDB unreachable or the command failed
    DatabaseError,
}

impl ErrorCode {
    const fn meta(self) -> (&'static str, i32, &'static str) {
        match self {
            Self::InvalidObjectId => ("INVALID_OBJECT_ID", 1002, "Invalid ObjectId format"),
            Self::JsonExtraction => ("JSON_EXTRACTION", 1003, "Failed to parse request body"),
            Self::NotFound => ("NOT_FOUND", 1004, "Resource not found"),
            Self::InternalError => ("INTERNAL_ERROR", 1005, "An internal server error occurred"),
            Self::Conflict => ("CONFLICT", 1008, "Resource already exists"),
            Self::InvalidQuery => ("INVALID_QUERY", 1009, "Invalid query parameter"),
            Self::BadRequest => ("BAD_REQUEST", 1010, "Bad request"),
            Self::DatabaseError => ("DATABASE_ERROR", 2003, "Database error occurred"),
        }
    }

    /// SCREAMING_SNAKE_CASE identifier, identical to the serde form
    pub const fn as_str(&self) -> &'static str {
        self.meta().0
    }

    pub const fn code(&self) -> i32 {
        self.meta().1
    }

    pub const fn default_message(&self) -> &'static str {
        self.meta().2
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
