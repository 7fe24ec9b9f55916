//! API routes module

pub mod categories;
pub mod health;
pub mod products;

use axum::{middleware, Router};
use axum_helpers::{require_auth_for_writes, JwtAuth};
use domain_categories::{CategoryRepository, CategoryService};
use domain_products::{ProductRepository, ProductService};

use crate::state::AppState;

/// Create all API routes backed by MongoDB
pub fn routes(state: &AppState) -> Router {
    resource_routes(
        products::service(state),
        categories::service(state),
        state.jwt.clone(),
    )
}

/// `/products` and `/categories`, with writes behind a bearer token.
pub fn resource_routes<P, C>(
    products: ProductService<P>,
    categories: CategoryService<C>,
    jwt: JwtAuth,
) -> Router
where
    P: ProductRepository + 'static,
    C: CategoryRepository + 'static,
{
    Router::new()
        .nest("/products", domain_products::handlers::router(products))
        .nest("/categories", domain_categories::handlers::router(categories))
        .layer(middleware::from_fn_with_state(jwt, require_auth_for_writes))
}

/// Initialize database indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    products::init_indexes(state).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use axum_helpers::{JwtConfig, ACCESS_TOKEN_TTL};
    use domain_categories::InMemoryCategoryRepository;
    use domain_products::{InMemoryProductRepository, Product};
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;

    const SECRET: &str = "this-is-a-valid-secret-with-32-chars!";

    fn jwt() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new(SECRET).unwrap())
    }

    fn app() -> Router {
        resource_routes(
            ProductService::new(InMemoryProductRepository::new()),
            CategoryService::new(InMemoryCategoryRepository::new()),
            jwt(),
        )
    }

    fn create_widget(token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/products")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder
            .body(Body::from(
                json!({"name": "Widget", "price": 9.99, "stock": 10, "categoryId": "cat1"})
                    .to_string(),
            ))
            .unwrap()
    }

    #[tokio::test]
    async fn test_writes_require_bearer_token() {
        let response = app().oneshot(create_widget(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app().oneshot(create_widget(Some("not-a-jwt"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_authorized_create_then_public_read() {
        let app = app();
        let token = jwt()
            .issue_token("clerk-1", &[], ACCESS_TOKEN_TTL)
            .unwrap();

        let response = app
            .clone()
            .oneshot(create_widget(Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let created: Product = serde_json::from_slice(&bytes).unwrap();

        let response = app
            .oneshot(
                Request::get(format!("/products/{}", created.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_category_reads_are_public() {
        let response = app()
            .oneshot(Request::get("/categories").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
