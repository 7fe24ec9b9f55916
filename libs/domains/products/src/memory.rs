//! In-process ProductRepository for tests and local runs without MongoDB.

use async_trait::async_trait;
use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{NewProduct, Product};
use crate::repository::ProductRepository;

/// Products keyed by ObjectId, so listings come back in `_id` order exactly
/// like the MongoDB store's `sort({_id: 1})`, and ids look like the ones
/// MongoDB mints.
///
/// `_id` order tracks creation order only as far as ObjectIds do: seconds
/// first, then a per-process counter that wraps after 2^24 ids.
#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<BTreeMap<ObjectId, Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

fn parse_id(id: &str) -> ProductResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| ProductError::NotFound(id.to_string()))
}

fn page<'a>(
    products: impl Iterator<Item = &'a Product>,
    limit: i64,
    offset: u64,
) -> Vec<Product> {
    let skipped = products.skip(usize::try_from(offset).unwrap_or(usize::MAX));
    match usize::try_from(limit) {
        Ok(limit) if limit > 0 => skipped.take(limit).cloned().collect(),
        _ => skipped.cloned().collect(),
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, draft: NewProduct) -> ProductResult<String> {
        let oid = ObjectId::new();
        let id = oid.to_hex();

        let mut product = Product::from_draft(id.clone(), draft);
        product.updated_at = Some(Utc::now());

        self.products.write().await.insert(oid, product);
        Ok(id)
    }

    async fn get_by_id(&self, id: &str) -> ProductResult<Product> {
        let oid = parse_id(id)?;
        self.products
            .read()
            .await
            .get(&oid)
            .cloned()
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    async fn update(&self, mut product: Product) -> ProductResult<()> {
        let oid = parse_id(&product.id)?;
        let mut products = self.products.write().await;

        let slot = products
            .get_mut(&oid)
            .ok_or_else(|| ProductError::NotFound(product.id.clone()))?;
        product.updated_at = Some(Utc::now());
        *slot = product;
        Ok(())
    }

    async fn delete(&self, id: &str) -> ProductResult<()> {
        let oid = parse_id(id)?;
        self.products
            .write()
            .await
            .remove(&oid)
            .map(|_| ())
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    async fn list(&self, limit: i64, offset: u64) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(page(products.values(), limit, offset))
    }

    async fn list_by_category(
        &self,
        category_id: &str,
        limit: i64,
        offset: u64,
    ) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        let matching = products.values().filter(|p| p.category_id == category_id);
        Ok(page(matching, limit, offset))
    }

    async fn update_stock(&self, id: &str, stock: i32) -> ProductResult<()> {
        let oid = parse_id(id)?;
        let mut products = self.products.write().await;

        let product = products
            .get_mut(&oid)
            .ok_or_else(|| ProductError::NotFound(id.to_string()))?;
        product.stock = stock;
        product.updated_at = Some(Utc::now());
        Ok(())
    }
}
