//! JSON body extractor that runs `validator` rules before the handler.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Deserialize the body as `T`, then validate it.
///
/// Malformed JSON rejects with `JSON_EXTRACTION`; failed rules reject with
/// `400 VALIDATION_ERROR` and per-field details.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::ValidatedJson;
///
/// async fn create(ValidatedJson(input): ValidatedJson<NewProduct>) -> impl IntoResponse {
///     // input.name is non-empty and input.price >= 0
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
        routing::post,
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Restock {
        #[validate(length(min = 1))]
        sku: String,
    }

    async fn handler(ValidatedJson(input): ValidatedJson<Restock>) -> String {
        input.sku
    }

    fn app() -> Router {
        Router::new().route("/", post(handler))
    }

    fn json_request(body: &'static str) -> Request<Body> {
        Request::post("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body_reaches_handler() {
        let response = app().oneshot(json_request(r#"{"sku":"A-1"}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rule_violation_is_bad_request() {
        let response = app().oneshot(json_request(r#"{"sku":""}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected() {
        let response = app().oneshot(json_request(r#"{"sku":"#)).await.unwrap();
        assert!(response.status().is_client_error());
    }
}
