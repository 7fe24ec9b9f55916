//! Inventory API - REST and gRPC server

use axum_helpers::{
    create_cors_layer, create_production_app, create_router, health_router, JwtAuth,
    ShutdownCoordinator,
};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::mongodb::connect_with_retry;
use rpc::inventory::InventoryServiceServer;
use std::net::SocketAddr;
use std::time::Duration;
use tonic::transport::Server as TonicServer;
use tracing::{error, info};

mod api;
mod config;
mod grpc;
mod openapi;
mod state;

use config::Config;
use grpc::InventoryGrpcService;
use state::AppState;

const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(url = %config.mongodb.redacted_url(), "Connecting to MongoDB");
    let mongo_client = connect_with_retry(&config.mongodb, None).await?;
    let db = mongo_client.database(config.mongodb.database());
    info!(database = %config.mongodb.database(), "Connected to MongoDB");

    let state = AppState {
        config: config.clone(),
        jwt: JwtAuth::new(&config.jwt),
        mongo_client,
        db,
    };

    api::init_indexes(&state).await?;

    let coordinator = ShutdownCoordinator::new();

    // gRPC server runs until the shared coordinator fires
    let grpc_service = InventoryGrpcService::new(api::products::service(&state));
    let grpc_addr: SocketAddr = config.grpc.address().parse()?;
    let grpc_coordinator = coordinator.clone();
    let grpc_handle = tokio::spawn(async move {
        info!("gRPC server listening on {}", grpc_addr);
        let stop = grpc_coordinator.clone();
        let result = TonicServer::builder()
            .add_service(InventoryServiceServer::new(grpc_service))
            .serve_with_shutdown(grpc_addr, async move { stop.wait_for_shutdown().await })
            .await;
        if let Err(e) = &result {
            error!(error = %e, "gRPC server failed");
            grpc_coordinator.shutdown();
        }
        result
    });

    let cors = create_cors_layer(config.cors_origins.clone());
    let app = create_router::<openapi::ApiDoc>(api::routes(&state), cors)
        .merge(health_router(config.app))
        .merge(api::health::router(state.mongo_client.clone()));

    info!(
        http_port = config.server.port,
        grpc_port = config.grpc.port,
        "Starting {} v{}",
        config.app.name,
        config.app.version
    );

    let mongo_client = state.mongo_client.clone();
    let rest_result = create_production_app(
        app,
        &config.server,
        coordinator,
        SHUTDOWN_GRACE_PERIOD,
        async move {
            info!("Closing MongoDB connections");
            mongo_client.shutdown().await;
        },
    )
    .await;

    let grpc_result = grpc_handle.await?;

    rest_result?;
    grpc_result?;

    info!("Inventory API shutdown complete");
    Ok(())
}
