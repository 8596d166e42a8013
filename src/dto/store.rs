use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dto::homepage::SectionBlock,
    layout::RenderTree,
    models::{Category, Product},
    style::StyleDocument,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct HomePage {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub sections: Vec<SectionBlock>,
    #[schema(value_type = Object)]
    pub style: StyleDocument,
    pub cart_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ModelSummary {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductPage {
    pub product: Product,
    pub category: Option<Category>,
    pub model: Option<ModelSummary>,
    #[schema(value_type = Object)]
    pub layout: RenderTree,
}
