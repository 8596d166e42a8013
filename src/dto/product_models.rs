use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    layout::{ModelDefinition, RenderTree},
    models::{Product, ProductModel},
};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateProductModelRequest {
    #[validate(length(min = 1, max = 255, message = "The name field is required."))]
    pub name: String,
    pub preview_product_id: Option<Uuid>,
    /// Defaults to true.
    pub is_active: Option<bool>,
    /// Omitted means the four-element starter layout.
    #[schema(value_type = Option<Object>)]
    pub definition: Option<ModelDefinition>,
}

impl CreateProductModelRequest {
    pub fn normalize(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateProductModelRequest {
    #[validate(length(min = 1, max = 255, message = "The name field is required."))]
    pub name: String,
    /// Replaces the stored preview product; `null` clears it.
    pub preview_product_id: Option<Uuid>,
    /// Omitted keeps the current flag.
    pub is_active: Option<bool>,
    /// Omitted keeps the current definition.
    #[schema(value_type = Option<Object>)]
    pub definition: Option<ModelDefinition>,
}

impl UpdateProductModelRequest {
    pub fn normalize(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateDefinitionRequest {
    #[schema(value_type = Object)]
    pub definition: ModelDefinition,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductRef {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

/// Everything the layout editor needs: the model, the product it previews and the rendered preview.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductModelEditor {
    pub model: ProductModel,
    pub preview_product: Option<Product>,
    #[schema(value_type = Option<Object>)]
    pub preview: Option<RenderTree>,
    pub products: Vec<ProductRef>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductModelList {
    #[schema(value_type = Vec<ProductModel>)]
    pub items: Vec<ProductModel>,
}
