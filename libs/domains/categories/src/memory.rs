use async_trait::async_trait;
use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, NewCategory};
use crate::repository::CategoryRepository;

/// Categories keyed by ObjectId, iterated in `_id` order like the MongoDB store.
#[derive(Default)]
pub struct InMemoryCategoryRepository {
    categories: RwLock<BTreeMap<ObjectId, Category>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn parse_id(id: &str) -> CategoryResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| CategoryError::NotFound(id.to_string()))
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn create(&self, draft: NewCategory) -> CategoryResult<String> {
        let oid = ObjectId::new();
        let mut category = Category::from_draft(oid.to_hex(), draft);
        category.updated_at = Some(Utc::now());

        self.categories.write().await.insert(oid, category);
        Ok(oid.to_hex())
    }

    async fn get_by_id(&self, id: &str) -> CategoryResult<Category> {
        let oid = parse_id(id)?;
        self.categories
            .read()
            .await
            .get(&oid)
            .cloned()
            .ok_or_else(|| CategoryError::NotFound(id.to_string()))
    }

    async fn update(&self, mut category: Category) -> CategoryResult<()> {
        let oid = parse_id(&category.id)?;
        let mut categories = self.categories.write().await;

        let slot = categories
            .get_mut(&oid)
            .ok_or_else(|| CategoryError::NotFound(category.id.clone()))?;
        category.updated_at = Some(Utc::now());
        *slot = category;
        Ok(())
    }

    async fn delete(&self, id: &str) -> CategoryResult<()> {
        let oid = parse_id(id)?;
        self.categories
            .write()
            .await
            .remove(&oid)
            .map(|_| ())
            .ok_or_else(|| CategoryError::NotFound(id.to_string()))
    }

    async fn list(&self, limit: i64, offset: u64) -> CategoryResult<Vec<Category>> {
        let categories = self.categories.read().await;
        let skipped = categories
            .values()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX));
        Ok(match usize::try_from(limit) {
            Ok(limit) if limit > 0 => skipped.take(limit).cloned().collect(),
            _ => skipped.cloned().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> NewCategory {
        NewCategory {
            name: name.to_string(),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn test_crud_round_trip() {
        let repo = InMemoryCategoryRepository::new();
        let id = repo.create(draft("Hardware")).await.unwrap();

        let mut category = repo.get_by_id(&id).await.unwrap();
        assert_eq!(category.name, "Hardware");

        category.description = "Tools".into();
        repo.update(category).await.unwrap();
        assert_eq!(repo.get_by_id(&id).await.unwrap().description, "Tools");

        repo.delete(&id).await.unwrap();
        assert!(matches!(
            repo.delete(&id).await,
            Err(CategoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_offset_past_end_is_empty() {
        let repo = InMemoryCategoryRepository::new();
        repo.create(draft("a")).await.unwrap();
        repo.create(draft("b")).await.unwrap();

        assert_eq!(repo.list(0, 0).await.unwrap().len(), 2);
        assert_eq!(repo.list(1, 1).await.unwrap()[0].name, "b");
        assert!(repo.list(10, 2).await.unwrap().is_empty());
    }
}
