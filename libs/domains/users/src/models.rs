use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Stored account record
///
/// Field names match the documents already present in the `user` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: String,
    /// Argon2 PHC string, never the plaintext
    #[serde(rename = "Password")]
    pub password_hash: String,
}

impl User {
    /// New record not yet assigned an id (password must already be hashed)
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        Self {
            id: None,
            name,
            email,
            password_hash,
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be empty".into()));
    }
    Ok(())
}

/// DTO for user registration
///
/// Accepts the storefront's `Name`/`Email`/`Password` keys as well as lowercase ones.
/// Missing fields deserialize as empty and fail validation.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[serde(rename = "Name", alias = "name", default)]
    #[validate(custom(function = "not_blank"))]
    pub name: String,

    #[serde(rename = "Email", alias = "email", default)]
    #[validate(custom(function = "not_blank"), email(message = "must be a valid email address"))]
    pub email: String,

    #[serde(rename = "Password", alias = "password", default)]
    #[validate(custom(function = "not_blank"))]
    pub password: String,
}

/// DTO for user login
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(rename = "Email", alias = "email", default)]
    #[validate(custom(function = "not_blank"))]
    pub email: String,

    #[serde(rename = "Password", alias = "password", default)]
    #[validate(custom(function = "not_blank"))]
    pub password: String,
}

/// Body returned by registration
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
}

impl RegisterResponse {
    pub fn registered() -> Self {
        Self {
            success: true,
            message: "User registered successfully".to_string(),
        }
    }
}

/// Body returned by a successful login
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    /// HS256 JWT carrying the account email
    pub token: String,
}

impl LoginResponse {
    pub fn with_token(token: String) -> Self {
        Self {
            success: true,
            message: "Login successful".to_string(),
            token,
        }
    }
}

/// Body of every auth failure
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AuthFailure {
    pub success: bool,
    pub message: String,
}
