//! OpenAPI documentation configuration

use utoipa::OpenApi;

use crate::api::root;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "BabyCare Store API",
        version = "0.1.0",
        description = "Accounts, product catalog and order intake for the BabyCare storefront"
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    paths(root::hello),
    tags(
        (name = "Root", description = "Liveness banner")
    )
)]
struct BaseDoc;

/// Combined OpenAPI documentation for all APIs
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = BaseDoc::openapi();
        doc.merge(domain_users::ApiDoc::openapi());
        doc.merge(domain_products::ApiDoc::openapi());
        doc.merge(domain_orders::ApiDoc::openapi());
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merged_doc_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/",
            "/api/v1/register",
            "/api/v1/login",
            "/products",
            "/product/{id}",
            "/flash-sale",
            "/orders",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}
