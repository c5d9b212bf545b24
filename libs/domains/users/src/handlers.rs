//! HTTP handlers for registration and login

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::post,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserError;
use crate::models::{AuthFailure, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::repository::UserRepository;
use crate::service::AuthService;

/// OpenAPI documentation for Auth API
#[derive(OpenApi)]
#[openapi(
    paths(register, login),
    components(schemas(RegisterRequest, LoginRequest, RegisterResponse, LoginResponse, AuthFailure)),
    tags(
        (name = "Auth", description = "Account registration and login")
    )
)]
pub struct ApiDoc;

/// Create the auth router
pub fn router<R: UserRepository + 'static>(service: AuthService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/api/v1/register", post(register))
        .route("/api/v1/login", post(login))
        .with_state(shared_service)
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/v1/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 400, description = "User already exists or invalid input", body = AuthFailure),
        (status = 500, description = "Internal server error", body = AuthFailure)
    )
)]
async fn register<R: UserRepository>(
    State(service): State<Arc<AuthService<R>>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), UserError> {
    let Json(input) = payload?;
    service.register(input).await?;
    Ok((StatusCode::CREATED, Json(RegisterResponse::registered())))
}

/// Log in and receive a token
#[utoipa::path(
    post,
    path = "/api/v1/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Invalid input", body = AuthFailure),
        (status = 401, description = "Invalid email or password", body = AuthFailure),
        (status = 500, description = "Internal server error", body = AuthFailure)
    )
)]
async fn login<R: UserRepository>(
    State(service): State<Arc<AuthService<R>>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, UserError> {
    let Json(input) = payload?;
    let token = service.login(input).await?;
    Ok(Json(LoginResponse::with_token(token)))
}
