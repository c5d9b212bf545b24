//! HTTP handlers for the product catalog

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use axum_helpers::{
    ObjectIdPath,
    errors::responses::{
        BadRequestObjectIdResponse, BadRequestQueryResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{Product, ProductQuery};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(list_products, find_product, get_product, flash_sale),
    components(
        schemas(Product),
        responses(
            NotFoundResponse,
            BadRequestObjectIdResponse,
            BadRequestQueryResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/products", get(list_products))
        .route("/products/{id}", get(get_product))
        .route("/product/{id}", get(find_product))
        .route("/flash-sale", get(flash_sale))
        .with_state(shared_service)
}

/// List products, optionally filtered by category, minimum rating and maximum price
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    params(ProductQuery),
    responses(
        (status = 200, description = "Matching products", body = Vec<Product>),
        (status = 400, response = BadRequestQueryResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(query): Query<ProductQuery>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_products(query).await?;
    Ok(Json(products))
}

/// Look up a product by id; the body is an array with zero or one element
#[utoipa::path(
    get,
    path = "/product/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product ObjectId (24 hex characters)")),
    responses(
        (status = 200, description = "Matching product, if any", body = Vec<Product>),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn find_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.find_by_id(&id).await?;
    Ok(Json(products))
}

/// Get a single product by id
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product ObjectId (24 hex characters)")),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> ProductResult<Json<Product>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Flash-sale products, oldest first
#[utoipa::path(
    get,
    path = "/flash-sale",
    tag = "Products",
    responses(
        (status = 200, description = "Flash-sale products ordered by createdAt", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn flash_sale<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.flash_sale().await?;
    Ok(Json(products))
}
