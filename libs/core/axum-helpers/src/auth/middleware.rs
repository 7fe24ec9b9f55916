use super::jwt::JwtAuth;
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, Method, header},
    middleware::Next,
    response::Response,
};

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Require a valid `Authorization: Bearer <jwt>` header.
///
/// On success the decoded [`JwtClaims`](super::JwtClaims) are inserted into
/// request extensions.
///
/// ```ignore
/// let writes = Router::new()
///     .route("/products", post(create_product))
///     .layer(axum::middleware::from_fn_with_state(auth, jwt_auth_middleware));
/// ```
pub async fn jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers()).ok_or_else(|| {
        tracing::debug!("No bearer token on request");
        AppError::Unauthorized("Missing authorization token".to_string())
    })?;

    let claims = auth.verify_token(token).map_err(|e| {
        tracing::debug!(error = %e, "JWT verification failed");
        AppError::Unauthorized("Invalid or expired token".to_string())
    })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// [`jwt_auth_middleware`] for state-changing methods only.
///
/// `GET`, `HEAD` and `OPTIONS` pass through unauthenticated, so one layer can
/// guard a whole resource router while reads stay public.
pub async fn require_auth_for_writes(
    State(auth): State<JwtAuth>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if matches!(
        *request.method(),
        Method::GET | Method::HEAD | Method::OPTIONS
    ) {
        return Ok(next.run(request).await);
    }
    jwt_auth_middleware(State(auth), request, next).await
}
