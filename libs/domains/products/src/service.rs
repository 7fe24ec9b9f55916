//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::{NewProduct, Product, ProductUpdate};
use crate::repository::ProductRepository;

/// Thin use-case layer over a [`ProductRepository`].
///
/// Input validation happens at the transport edge; the service forwards to
/// the store and, on create, stamps the assigned id onto the returned product.
/// It never checks that `category_id` refers to an existing category.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Persist `draft` and return it with its new id.
    #[instrument(skip(self, draft), fields(product_name = %draft.name))]
    pub async fn add_product(&self, draft: NewProduct) -> ProductResult<Product> {
        let id = self.repository.create(draft.clone()).await?;
        Ok(Product::from_draft(id, draft))
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> ProductResult<Product> {
        self.repository.get_by_id(id).await
    }

    /// Apply `patch` to the stored product and return the stored result.
    #[instrument(skip(self, patch))]
    pub async fn update_product(&self, id: &str, patch: ProductUpdate) -> ProductResult<Product> {
        let mut product = self.repository.get_by_id(id).await?;
        product.apply_update(patch);
        self.repository.update(product).await?;
        self.repository.get_by_id(id).await
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> ProductResult<()> {
        self.repository.delete(id).await
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self, limit: i64, offset: u64) -> ProductResult<Vec<Product>> {
        self.repository.list(limit, offset).await
    }

    #[instrument(skip(self))]
    pub async fn list_by_category(
        &self,
        category_id: &str,
        limit: i64,
        offset: u64,
    ) -> ProductResult<Vec<Product>> {
        self.repository
            .list_by_category(category_id, limit, offset)
            .await
    }

    /// Set the absolute stock count and return the stored product.
    #[instrument(skip(self))]
    pub async fn update_stock(&self, id: &str, stock: i32) -> ProductResult<Product> {
        self.repository.update_stock(id, stock).await?;
        self.repository.get_by_id(id).await
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
