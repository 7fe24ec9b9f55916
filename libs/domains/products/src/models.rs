use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Default page size for list endpoints
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// `range(min = 0.0)` lets NaN through since every NaN comparison is false.
fn validate_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::new("invalid_price"));
    }
    Ok(())
}

/// A stocked product.
///
/// `id` is the hex form of the store-assigned ObjectId. `category_id` is a
/// loose reference and is never checked against the categories collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[schema(example = "665f1c2e9b1d4a3f8c0e7a12")]
    pub id: String,
    #[schema(example = "Widget")]
    pub name: String,
    pub description: String,
    #[schema(example = 9.99)]
    pub price: f64,
    /// May be negative; backorders are not rejected
    #[schema(example = 10)]
    pub stock: i32,
    #[schema(example = "cat1")]
    pub category_id: String,
    /// Set by the store on create, update and stock changes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Combine a draft with the identity the store assigned to it.
    pub fn from_draft(id: impl Into<String>, draft: NewProduct) -> Self {
        Self {
            id: id.into(),
            name: draft.name,
            description: draft.description,
            price: draft.price,
            stock: draft.stock,
            category_id: draft.category_id,
            updated_at: None,
        }
    }

    /// Overwrite the fields present in `patch`; identity is untouched.
    pub fn apply_update(&mut self, patch: ProductUpdate) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = category_id;
        }
    }
}

/// Create input: every product field except the store-owned `id` and `updatedAt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    #[validate(length(min = 1, message = "name must not be empty"))]
    #[schema(example = "Widget")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(custom(function = "validate_price", message = "price must be a finite, non-negative amount"))]
    #[schema(example = 9.99)]
    pub price: f64,
    #[serde(default)]
    #[schema(example = 10)]
    pub stock: i32,
    #[serde(default)]
    #[schema(example = "cat1")]
    pub category_id: String,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(custom(function = "validate_price", message = "price must be a finite, non-negative amount"))]
    pub price: Option<f64>,
    pub stock: Option<i32>,
    pub category_id: Option<String>,
}

/// Body of `PATCH /products/{id}/stock`: the new absolute count.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate, ToSchema)]
pub struct StockUpdate {
    #[schema(example = 25)]
    pub stock: i32,
}

/// Paging parameters. `limit <= 0` means no limit.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
pub struct ListQuery {
    /// Maximum number of results (default 50)
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Number of results to skip
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> NewProduct {
        NewProduct {
            name: "Widget".to_string(),
            description: "A widget".to_string(),
            price: 9.99,
            stock: 10,
            category_id: "cat1".to_string(),
        }
    }

    #[test]
    fn test_from_draft_keeps_fields() {
        let product = Product::from_draft("665f1c2e9b1d4a3f8c0e7a12", widget());
        assert_eq!(product.id, "665f1c2e9b1d4a3f8c0e7a12");
        assert_eq!(product.name, "Widget");
        assert_eq!(product.price, 9.99);
        assert_eq!(product.stock, 10);
        assert_eq!(product.category_id, "cat1");
        assert!(product.updated_at.is_none());
    }

    #[test]
    fn test_apply_update_only_touches_present_fields() {
        let mut product = Product::from_draft("id-1", widget());
        product.apply_update(ProductUpdate {
            price: Some(12.5),
            stock: Some(-3),
            ..Default::default()
        });

        assert_eq!(product.id, "id-1");
        assert_eq!(product.name, "Widget");
        assert_eq!(product.price, 12.5);
        assert_eq!(product.stock, -3);
    }

    #[test]
    fn test_new_product_validation() {
        assert!(widget().validate().is_ok());

        let mut unnamed = widget();
        unnamed.name.clear();
        assert!(unnamed.validate().is_err());

        let mut negative = widget();
        negative.price = -0.01;
        assert!(negative.validate().is_err());

        for price in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut odd = widget();
            odd.price = price;
            assert!(odd.validate().is_err(), "{price} should be rejected");
        }

        let mut free = widget();
        free.price = 0.0;
        assert!(free.validate().is_ok());

        let mut backordered = widget();
        backordered.stock = -5;
        assert!(backordered.validate().is_ok());
    }

    #[test]
    fn test_update_rejects_non_finite_price() {
        let patch = ProductUpdate {
            price: Some(f64::NAN),
            ..Default::default()
        };
        assert!(patch.validate().is_err());

        assert!(ProductUpdate::default().validate().is_ok());
        assert!(ProductUpdate {
            price: Some(12.5),
            ..Default::default()
        }
        .validate()
        .is_ok());
    }

    #[test]
    fn test_json_uses_camel_case() {
        let json = serde_json::to_value(Product::from_draft("id-1", widget())).unwrap();
        assert_eq!(json["categoryId"], "cat1");
        assert!(json.get("category_id").is_none());
        assert!(json.get("updatedAt").is_none());

        let draft: NewProduct =
            serde_json::from_str(r#"{"name":"Widget","price":9.99,"categoryId":"cat1"}"#).unwrap();
        assert_eq!(draft.stock, 0);
        assert_eq!(draft.description, "");
        assert_eq!(draft.category_id, "cat1");
    }

    #[test]
    fn test_list_query_defaults() {
        let query: ListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.limit, DEFAULT_PAGE_SIZE);
        assert_eq!(query.offset, 0);
    }
}
