use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::Category;

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = 255, message = "The name field is required."))]
    pub name: String,
    /// Optional on create, where a blank slug is generated from the name.
    #[validate(length(max = 255))]
    pub slug: Option<String>,
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
}

impl CategoryRequest {
    pub fn normalize(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.slug = self
            .slug
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        self
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryRow {
    #[serde(flatten)]
    pub category: Category,
    pub parent_name: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct CategoryList {
    #[schema(value_type = Vec<CategoryRow>)]
    pub items: Vec<CategoryRow>,
}
