use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::Product;

/// Body for both create and update. Blank slug or SKU means "generate one".
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ProductRequest {
    #[validate(length(min = 1, max = 255, message = "The name field is required."))]
    pub name: String,
    #[validate(length(max = 255))]
    pub slug: Option<String>,
    #[validate(length(max = 100))]
    pub sku: Option<String>,
    pub category_id: Option<Uuid>,
    pub product_model_id: Option<Uuid>,
    pub description: Option<String>,
    #[validate(custom(function = "non_negative", message = "The price must be at least 0."))]
    pub price: Decimal,
    #[validate(range(min = 0, message = "The stock must be at least 0."))]
    pub stock: i32,
    #[validate(url(message = "The image url must be a valid URL."))]
    pub image_url: Option<String>,
    /// Defaults to true.
    pub is_active: Option<bool>,
}

impl ProductRequest {
    pub fn normalize(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.slug = blank_to_none(self.slug);
        self.sku = blank_to_none(self.sku);
        self.image_url = blank_to_none(self.image_url);
        self
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("non_negative"));
    }
    Ok(())
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}
