//! # Axum Helpers
//!
//! Shared HTTP plumbing for the inventory services.
//!
//! - **[`auth`]**: stateless HS256 bearer-token verification
//! - **[`server`]**: router assembly, health checks, graceful shutdown
//! - **[`http`]**: CORS and security-header layers
//! - **[`errors`]**: [`AppError`] and the JSON error body
//! - **[`extractors`]**: [`ValidatedJson`]

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{
    ACCESS_TOKEN_TTL, JwtAuth, JwtClaims, JwtConfig, jwt_auth_middleware, require_auth_for_writes,
};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};

pub use http::{create_cors_layer, parse_allowed_origins, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::ValidatedJson;
