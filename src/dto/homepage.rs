use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    models::{Category, HomepageSection, Product},
    style::CardStyle,
};

pub const DEFAULT_PRODUCT_LIMIT: i32 = 4;

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SectionCategoryInput {
    pub id: Uuid,
    /// Defaults to 4.
    #[validate(range(min = 1, max = 50, message = "The limit must be between 1 and 50."))]
    pub product_limit: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SectionRequest {
    #[validate(length(min = 1, max = 255, message = "The title field is required."))]
    pub title: String,
    pub is_active: Option<bool>,
    /// Defaults to 0 on create; omitted on update keeps the current position.
    #[validate(range(min = 0))]
    pub position: Option<i32>,
    #[serde(default)]
    #[validate(nested)]
    pub categories: Vec<SectionCategoryInput>,
}

impl SectionRequest {
    pub fn normalize(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SectionOrderEntry {
    pub id: Uuid,
    #[validate(range(min = 0, message = "Position must be zero or more."))]
    pub position: i32,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ReorderSectionsRequest {
    #[validate(nested)]
    pub sections: Vec<SectionOrderEntry>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SectionCategory {
    #[serde(flatten)]
    pub category: Category,
    pub product_limit: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SectionWithCategories {
    #[serde(flatten)]
    pub section: HomepageSection,
    pub categories: Vec<SectionCategory>,
}

/// Editor payload: the section, every category to choose from and the section card style.
#[derive(Debug, Serialize, ToSchema)]
pub struct SectionDetail {
    pub section: SectionWithCategories,
    pub all_categories: Vec<Category>,
    #[schema(value_type = Object)]
    pub style: CardStyle,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SectionGroup {
    pub category: Category,
    pub products: Vec<Product>,
}

/// A composed storefront section: one product group per linked category.
#[derive(Debug, Serialize, ToSchema)]
pub struct SectionBlock {
    pub section: HomepageSection,
    pub groups: Vec<SectionGroup>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct SectionList {
    #[schema(value_type = Vec<SectionWithCategories>)]
    pub items: Vec<SectionWithCategories>,
}
