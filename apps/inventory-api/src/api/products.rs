//! Products API wiring

use domain_products::{MongoProductRepository, ProductService};

use crate::state::AppState;

pub fn repository(state: &AppState) -> MongoProductRepository {
    MongoProductRepository::new(&state.db).with_timeout(state.config.store_timeout)
}

pub fn service(state: &AppState) -> ProductService<MongoProductRepository> {
    ProductService::new(repository(state))
}

/// Initialize products indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    repository(state).init_indexes().await?;
    Ok(())
}
