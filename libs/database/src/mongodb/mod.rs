//! MongoDB client bootstrap
//!
//! Builds a pooled [`Client`] from [`MongoConfig`], verifies it with a
//! `ping`, and exposes health probes for readiness endpoints.

mod config;
mod connector;
mod health;
mod timeout;

pub use config::MongoConfig;
pub use connector::{MongoError, client_options, connect, connect_with_retry};
pub use health::{HealthStatus, check_health, check_health_detailed};
pub use timeout::{DEFAULT_OPERATION_TIMEOUT, with_timeout};

pub use mongodb::{Client, Collection, Database};
