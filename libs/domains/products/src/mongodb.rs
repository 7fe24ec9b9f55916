//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use database::mongodb::{with_timeout, DEFAULT_OPERATION_TIMEOUT};
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime as BsonDateTime, Document},
    options::{FindOptions, IndexOptions},
    Collection, Database, IndexModel,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{NewProduct, Product};
use crate::repository::ProductRepository;

/// Stored layout of a product in the `products` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProductDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
    #[serde(default)]
    description: String,
    price: f64,
    stock: i32,
    #[serde(default)]
    category_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<BsonDateTime>,
}

impl ProductDocument {
    fn from_draft(draft: NewProduct, now: BsonDateTime) -> Self {
        Self {
            id: None,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            stock: draft.stock,
            category_id: draft.category_id,
            updated_at: Some(now),
        }
    }

    /// Replacement body for an existing product; `_id` is left to the filter.
    fn replacement(product: Product, now: BsonDateTime) -> Self {
        Self {
            id: None,
            name: product.name,
            description: product.description,
            price: product.price,
            stock: product.stock,
            category_id: product.category_id,
            updated_at: Some(now),
        }
    }
}

impl From<ProductDocument> for Product {
    fn from(doc: ProductDocument) -> Self {
        Product {
            id: doc.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            name: doc.name,
            description: doc.description,
            price: doc.price,
            stock: doc.stock,
            category_id: doc.category_id,
            updated_at: doc
                .updated_at
                .and_then(|at| chrono::DateTime::from_timestamp_millis(at.timestamp_millis())),
        }
    }
}

/// A string that is not an ObjectId can never match a stored product.
fn parse_id(id: &str) -> ProductResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| ProductError::NotFound(id.to_string()))
}

fn page_options(limit: i64, offset: u64) -> FindOptions {
    FindOptions::builder()
        .limit((limit > 0).then_some(limit))
        .skip((offset > 0).then_some(offset))
        .sort(doc! { "_id": 1 })
        .build()
}

/// MongoDB implementation of the ProductRepository
///
/// Every call is bounded by the repository's operation timeout.
pub struct MongoProductRepository {
    collection: Collection<ProductDocument>,
    timeout: Duration,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, "products")
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<ProductDocument>(collection_name),
            timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    /// Override the per-operation deadline (default 5s)
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Create the `category_id` index used by category listings
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "category_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("idx_category_id".to_string())
                    .build(),
            )
            .build();

        with_timeout("products.create_index", self.timeout, async {
            self.collection.create_index(index).await
        })
        .await?;

        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    async fn find_page(
        &self,
        operation: &'static str,
        filter: Document,
        limit: i64,
        offset: u64,
    ) -> ProductResult<Vec<Product>> {
        let documents: Vec<ProductDocument> = with_timeout(operation, self.timeout, async {
            self.collection
                .find(filter)
                .with_options(page_options(limit, offset))
                .await?
                .try_collect()
                .await
        })
        .await?;

        Ok(documents.into_iter().map(Product::from).collect())
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, draft), fields(product_name = %draft.name))]
    async fn create(&self, draft: NewProduct) -> ProductResult<String> {
        let document = ProductDocument::from_draft(draft, BsonDateTime::now());

        let result = with_timeout("products.insert_one", self.timeout, async {
            self.collection.insert_one(&document).await
        })
        .await?;

        let id = result
            .inserted_id
            .as_object_id()
            .map(|oid| oid.to_hex())
            .ok_or_else(|| {
                ProductError::Persistence(format!(
                    "unexpected inserted id type: {}",
                    result.inserted_id
                ))
            })?;

        tracing::info!(product_id = %id, "Product created successfully");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> ProductResult<Product> {
        let oid = parse_id(id)?;

        let document = with_timeout("products.find_one", self.timeout, async {
            self.collection.find_one(doc! { "_id": oid }).await
        })
        .await?;

        document
            .map(Product::from)
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn update(&self, product: Product) -> ProductResult<()> {
        let oid = parse_id(&product.id)?;
        let id = product.id.clone();
        let replacement = ProductDocument::replacement(product, BsonDateTime::now());

        let result = with_timeout("products.replace_one", self.timeout, async {
            self.collection
                .replace_one(doc! { "_id": oid }, &replacement)
                .await
        })
        .await?;

        if result.matched_count == 0 {
            return Err(ProductError::NotFound(id));
        }

        tracing::info!(product_id = %id, "Product updated successfully");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> ProductResult<()> {
        let oid = parse_id(id)?;

        let result = with_timeout("products.delete_one", self.timeout, async {
            self.collection.delete_one(doc! { "_id": oid }).await
        })
        .await?;

        if result.deleted_count == 0 {
            return Err(ProductError::NotFound(id.to_string()));
        }

        tracing::info!(product_id = %id, "Product deleted successfully");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self, limit: i64, offset: u64) -> ProductResult<Vec<Product>> {
        self.find_page("products.find", doc! {}, limit, offset)
            .await
    }

    #[instrument(skip(self))]
    async fn list_by_category(
        &self,
        category_id: &str,
        limit: i64,
        offset: u64,
    ) -> ProductResult<Vec<Product>> {
        self.find_page(
            "products.find_by_category",
            doc! { "category_id": category_id },
            limit,
            offset,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn update_stock(&self, id: &str, stock: i32) -> ProductResult<()> {
        let oid = parse_id(id)?;
        let update = doc! {
            "$set": { "stock": stock, "updated_at": BsonDateTime::now() }
        };

        let result = with_timeout("products.update_one", self.timeout, async {
            self.collection.update_one(doc! { "_id": oid }, update).await
        })
        .await?;

        if result.matched_count == 0 {
            return Err(ProductError::NotFound(id.to_string()));
        }

        tracing::info!(product_id = %id, stock, "Product stock updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_round_trip_keeps_hex_id() {
        let oid = ObjectId::new();
        let doc = ProductDocument {
            id: Some(oid),
            name: "Widget".to_string(),
            description: String::new(),
            price: 9.99,
            stock: 10,
            category_id: "cat1".to_string(),
            updated_at: Some(BsonDateTime::from_millis(1_700_000_000_000)),
        };

        let product = Product::from(doc);
        assert_eq!(product.id, oid.to_hex());
        assert_eq!(
            product.updated_at.map(|at| at.timestamp_millis()),
            Some(1_700_000_000_000)
        );
    }

    #[test]
    fn test_new_document_has_no_id() {
        let draft = NewProduct {
            name: "Widget".to_string(),
            description: String::new(),
            price: 9.99,
            stock: 10,
            category_id: "cat1".to_string(),
        };
        let bson = mongodb::bson::to_document(&ProductDocument::from_draft(
            draft,
            BsonDateTime::now(),
        ))
        .unwrap();

        assert!(!bson.contains_key("_id"));
        assert_eq!(bson.get_str("category_id").unwrap(), "cat1");
        assert!(bson.contains_key("updated_at"));
    }

    #[test]
    fn test_malformed_id_is_not_found() {
        assert!(matches!(
            parse_id("nonexistent-id"),
            Err(ProductError::NotFound(id)) if id == "nonexistent-id"
        ));
    }

    #[test]
    fn test_page_options_treat_non_positive_limit_as_unbounded() {
        assert_eq!(page_options(0, 0).limit, None);
        assert_eq!(page_options(-1, 0).limit, None);
        assert_eq!(page_options(10, 20).limit, Some(10));
        assert_eq!(page_options(10, 20).skip, Some(20));
    }
}
