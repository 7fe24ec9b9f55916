use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[schema(example = "665f1c2e9b1d4a3f8c0e7a99")]
    pub id: String,
    #[schema(example = "Hardware")]
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Category {
    pub fn from_draft(id: impl Into<String>, draft: NewCategory) -> Self {
        Self {
            id: id.into(),
            name: draft.name,
            description: draft.description,
            updated_at: None,
        }
    }

    pub fn apply_update(&mut self, patch: CategoryUpdate) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    #[validate(length(min = 1, message = "name must not be empty"))]
    #[schema(example = "Hardware")]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
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
    50
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category_requires_name() {
        let draft: NewCategory = serde_json::from_str(r#"{"name":""}"#).unwrap();
        assert!(draft.validate().is_err());

        let draft: NewCategory = serde_json::from_str(r#"{"name":"Hardware"}"#).unwrap();
        assert!(draft.validate().is_ok());
        assert_eq!(draft.description, "");
    }

    #[test]
    fn test_apply_update_keeps_absent_fields() {
        let mut category = Category::from_draft(
            "id-1",
            NewCategory {
                name: "Hardware".into(),
                description: "Tools".into(),
            },
        );
        category.apply_update(CategoryUpdate {
            description: Some("Tools and fasteners".into()),
            ..Default::default()
        });

        assert_eq!(category.name, "Hardware");
        assert_eq!(category.description, "Tools and fasteners");
    }
}
