use async_trait::async_trait;

use crate::error::ProductResult;
use crate::models::{NewProduct, Product};

/// Storage contract for products.
///
/// Identity-keyed operations report a missing document as
/// [`ProductError::NotFound`](crate::ProductError::NotFound), including ids that
/// could never have been issued. Everything else the backend can fail with,
/// timeouts included, surfaces as `Persistence`.
///
/// Paging: `limit <= 0` means no limit; an `offset` past the end yields an
/// empty page.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new product and return its store-assigned id
    async fn create(&self, draft: NewProduct) -> ProductResult<String>;

    async fn get_by_id(&self, id: &str) -> ProductResult<Product>;

    /// Replace the stored document keyed by `product.id`, refreshing `updated_at`
    async fn update(&self, product: Product) -> ProductResult<()>;

    async fn delete(&self, id: &str) -> ProductResult<()>;

    /// Products in `_id` order
    async fn list(&self, limit: i64, offset: u64) -> ProductResult<Vec<Product>>;

    /// Products whose `category_id` matches exactly, in `_id` order
    async fn list_by_category(
        &self,
        category_id: &str,
        limit: i64,
        offset: u64,
    ) -> ProductResult<Vec<Product>>;

    /// Set the absolute stock count, refreshing `updated_at`
    async fn update_stock(&self, id: &str, stock: i32) -> ProductResult<()>;
}
