use std::sync::Arc;
use tracing::instrument;

use crate::error::CategoryResult;
use crate::models::{Category, CategoryUpdate, NewCategory};
use crate::repository::CategoryRepository;

pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, draft), fields(category_name = %draft.name))]
    pub async fn add_category(&self, draft: NewCategory) -> CategoryResult<Category> {
        let id = self.repository.create(draft.clone()).await?;
        Ok(Category::from_draft(id, draft))
    }

    #[instrument(skip(self))]
    pub async fn get_category(&self, id: &str) -> CategoryResult<Category> {
        self.repository.get_by_id(id).await
    }

    #[instrument(skip(self, patch))]
    pub async fn update_category(
        &self,
        id: &str,
        patch: CategoryUpdate,
    ) -> CategoryResult<Category> {
        let mut category = self.repository.get_by_id(id).await?;
        category.apply_update(patch);
        self.repository.update(category).await?;
        self.repository.get_by_id(id).await
    }

    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: &str) -> CategoryResult<()> {
        self.repository.delete(id).await
    }

    #[instrument(skip(self))]
    pub async fn list_categories(&self, limit: i64, offset: u64) -> CategoryResult<Vec<Category>> {
        self.repository.list(limit, offset).await
    }
}

impl<R: CategoryRepository> Clone for CategoryService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
