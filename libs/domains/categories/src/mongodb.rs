//! MongoDB implementation of CategoryRepository

use async_trait::async_trait;
use database::mongodb::{with_timeout, DEFAULT_OPERATION_TIMEOUT};
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime as BsonDateTime},
    options::FindOptions,
    Collection, Database,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::instrument;

use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, NewCategory};
use crate::repository::CategoryRepository;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CategoryDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<BsonDateTime>,
}

impl From<CategoryDocument> for Category {
    fn from(doc: CategoryDocument) -> Self {
        Category {
            id: doc.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            name: doc.name,
            description: doc.description,
            updated_at: doc
                .updated_at
                .and_then(|at| chrono::DateTime::from_timestamp_millis(at.timestamp_millis())),
        }
    }
}

fn parse_id(id: &str) -> CategoryResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| CategoryError::NotFound(id.to_string()))
}

pub struct MongoCategoryRepository {
    collection: Collection<CategoryDocument>,
    timeout: Duration,
}

impl MongoCategoryRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<CategoryDocument>("categories"),
            timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl CategoryRepository for MongoCategoryRepository {
    #[instrument(skip(self, draft), fields(category_name = %draft.name))]
    async fn create(&self, draft: NewCategory) -> CategoryResult<String> {
        let document = CategoryDocument {
            id: None,
            name: draft.name,
            description: draft.description,
            updated_at: Some(BsonDateTime::now()),
        };

        let result = with_timeout("categories.insert_one", self.timeout, async {
            self.collection.insert_one(&document).await
        })
        .await?;

        let id = result
            .inserted_id
            .as_object_id()
            .map(|oid| oid.to_hex())
            .ok_or_else(|| {
                CategoryError::Persistence(format!(
                    "unexpected inserted id type: {}",
                    result.inserted_id
                ))
            })?;

        tracing::info!(category_id = %id, "Category created successfully");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> CategoryResult<Category> {
        let oid = parse_id(id)?;

        with_timeout("categories.find_one", self.timeout, async {
            self.collection.find_one(doc! { "_id": oid }).await
        })
        .await?
        .map(Category::from)
        .ok_or_else(|| CategoryError::NotFound(id.to_string()))
    }

    #[instrument(skip(self, category), fields(category_id = %category.id))]
    async fn update(&self, category: Category) -> CategoryResult<()> {
        let oid = parse_id(&category.id)?;
        let replacement = CategoryDocument {
            id: None,
            name: category.name,
            description: category.description,
            updated_at: Some(BsonDateTime::now()),
        };

        let result = with_timeout("categories.replace_one", self.timeout, async {
            self.collection
                .replace_one(doc! { "_id": oid }, &replacement)
                .await
        })
        .await?;

        if result.matched_count == 0 {
            return Err(CategoryError::NotFound(category.id));
        }

        tracing::info!(category_id = %category.id, "Category updated successfully");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> CategoryResult<()> {
        let oid = parse_id(id)?;

        let result = with_timeout("categories.delete_one", self.timeout, async {
            self.collection.delete_one(doc! { "_id": oid }).await
        })
        .await?;

        if result.deleted_count == 0 {
            return Err(CategoryError::NotFound(id.to_string()));
        }

        tracing::info!(category_id = %id, "Category deleted successfully");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self, limit: i64, offset: u64) -> CategoryResult<Vec<Category>> {
        let options = FindOptions::builder()
            .limit((limit > 0).then_some(limit))
            .skip((offset > 0).then_some(offset))
            .sort(doc! { "_id": 1 })
            .build();

        let documents: Vec<CategoryDocument> =
            with_timeout("categories.find", self.timeout, async {
                self.collection
                    .find(doc! {})
                    .with_options(options)
                    .await?
                    .try_collect()
                    .await
            })
            .await?;

        Ok(documents.into_iter().map(Category::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_maps_to_hex_id() {
        let oid = ObjectId::new();
        let category = Category::from(CategoryDocument {
            id: Some(oid),
            name: "Hardware".into(),
            description: String::new(),
            updated_at: None,
        });
        assert_eq!(category.id, oid.to_hex());
        assert!(category.updated_at.is_none());
    }

    #[test]
    fn test_malformed_id_is_not_found() {
        assert!(matches!(parse_id("cat1"), Err(CategoryError::NotFound(_))));
    }
}
