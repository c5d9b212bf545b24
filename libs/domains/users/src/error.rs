use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;
use validator::ValidationErrors;

use crate::models::AuthFailure;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User already exists")]
    DuplicateUser,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            UserError::DuplicateUser => (StatusCode::BAD_REQUEST, self.to_string()),
            UserError::InvalidCredentials => (StatusCode::UNAUTHORIZED, self.to_string()),
            UserError::Validation(msg) => {
                tracing::info!("Rejected auth request: {}", msg);
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            UserError::PasswordHash(msg)
            | UserError::Token(msg)
            | UserError::Database(msg)
            | UserError::Internal(msg) => {
                tracing::error!(error = %self, "Auth request failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (
            status,
            Json(AuthFailure {
                success: false,
                message,
            }),
        )
            .into_response()
    }
}

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        if is_duplicate_key(&err) {
            return UserError::DuplicateUser;
        }
        UserError::Database(err.to_string())
    }
}

impl From<ValidationErrors> for UserError {
    fn from(errors: ValidationErrors) -> Self {
        let mut problems: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let reason = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "is invalid".to_string());
                format!("{} {}", capitalize(&field), reason)
            })
            .collect();
        problems.sort();
        UserError::Validation(problems.join("; "))
    }
}

impl From<JsonRejection> for UserError {
    fn from(rejection: JsonRejection) -> Self {
        UserError::Validation(rejection.body_text())
    }
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// True when the server rejected a write on a unique index (E11000)
fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == 11000
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RegisterRequest;
    use http_body_util::BodyExt;
    use validator::Validate;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_user_body() {
        let response = UserError::DuplicateUser.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "User already exists");
    }

    #[tokio::test]
    async fn test_database_error_is_generic() {
        let response = UserError::Database("server selection timeout".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["message"], "An internal error occurred");
    }

    #[test]
    fn test_validation_errors_name_fields() {
        let req = RegisterRequest {
            name: String::new(),
            email: "a@x.com".to_string(),
            password: " ".to_string(),
        };

        let err = UserError::from(req.validate().unwrap_err());
        match err {
            UserError::Validation(msg) => {
                assert_eq!(msg, "Name must not be empty; Password must not be empty")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
