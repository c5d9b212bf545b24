//! HTTP handlers for order intake

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use axum_helpers::{AppError, errors::responses::InternalServerErrorResponse};
use serde_json::{Map, Value};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{OrderPayload, OrderReceipt};
use crate::repository::OrderRepository;
use crate::service::OrderService;

/// OpenAPI documentation for Orders API
#[derive(OpenApi)]
#[openapi(
    paths(submit_order),
    components(
        schemas(OrderReceipt),
        responses(InternalServerErrorResponse)
    ),
    tags(
        (name = "Orders", description = "Order intake")
    )
)]
pub struct ApiDoc;

/// Create the orders router
pub fn router<R: OrderRepository + 'static>(service: OrderService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/orders", post(submit_order))
        .with_state(shared_service)
}

/// Store an order document exactly as submitted
#[utoipa::path(
    post,
    path = "/orders",
    tag = "Orders",
    request_body(content = Object, description = "Any JSON object"),
    responses(
        (status = 200, description = "Order stored", body = OrderReceipt),
        (status = 400, description = "Body is not valid JSON"),
        (status = 409, description = "Caller-supplied _id already used"),
        (status = 415, description = "Missing application/json content type"),
        (status = 422, description = "Body is JSON but not an object"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn submit_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<OrderReceipt>, AppError> {
    let Json(order): Json<OrderPayload> = payload?;
    let receipt = service.submit(order).await?;
    Ok(Json(receipt))
}
