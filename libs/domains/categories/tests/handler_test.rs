//! Handler tests for the Categories domain

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use domain_categories::*;
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app() -> Router {
    handlers::router(CategoryService::new(InMemoryCategoryRepository::new()))
}

fn request(method: &str, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[tokio::test]
async fn test_category_lifecycle() {
    let app = app();

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/",
            Some(json!({"name": "Hardware", "description": "Tools"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Category = json_body(response.into_body()).await;
    let uri = format!("/{}", created.id);

    let response = app
        .clone()
        .oneshot(request("PUT", &uri, Some(json!({"name": "Hardware & Tools"}))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Category = json_body(response.into_body()).await;
    assert_eq!(updated.name, "Hardware & Tools");
    assert_eq!(updated.description, "Tools");

    let response = app.clone().oneshot(request("GET", "/", None)).await.unwrap();
    let all: Vec<Category> = json_body(response.into_body()).await;
    assert_eq!(all.len(), 1);

    let response = app.clone().oneshot(request("DELETE", &uri, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(request("GET", &uri, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_rejects_empty_name() {
    let response = app()
        .oneshot(request("POST", "/", Some(json!({"name": ""}))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
