use async_trait::async_trait;

use crate::error::CategoryResult;
use crate::models::{Category, NewCategory};

/// Storage contract for categories; same not-found and paging rules as
/// the product store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, draft: NewCategory) -> CategoryResult<String>;

    async fn get_by_id(&self, id: &str) -> CategoryResult<Category>;

    async fn update(&self, category: Category) -> CategoryResult<()>;

    async fn delete(&self, id: &str) -> CategoryResult<()>;

    async fn list(&self, limit: i64, offset: u64) -> CategoryResult<Vec<Category>>;
}
