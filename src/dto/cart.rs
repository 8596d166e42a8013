use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Order, OrderItem, Product};

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct AddToCartRequest {
    /// Defaults to 1.
    #[validate(range(min = 1, max = 100, message = "Quantity must be between 1 and 100."))]
    pub qty: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CartLineInput {
    pub product_id: Uuid,
    #[validate(range(min = 0, max = 100, message = "Quantity must be between 0 and 100."))]
    pub qty: i32,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateCartRequest {
    #[validate(nested)]
    pub lines: Vec<CartLineInput>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartLineView {
    pub product: Product,
    pub qty: i32,
    pub line_total: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub subtotal: Decimal,
    pub item_count: i64,
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct CheckoutRequest {
    #[validate(length(max = 255))]
    pub customer_name: Option<String>,
    #[validate(email)]
    pub customer_email: Option<String>,
    #[validate(length(max = 50))]
    pub customer_phone: Option<String>,
    #[validate(length(max = 255))]
    pub ship_line1: Option<String>,
    #[validate(length(max = 255))]
    pub ship_line2: Option<String>,
    #[validate(length(max = 255))]
    pub ship_city: Option<String>,
    #[validate(length(max = 255))]
    pub ship_state: Option<String>,
    #[validate(length(max = 50))]
    pub ship_postal_code: Option<String>,
    #[validate(length(max = 100))]
    pub ship_country: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutResult {
    pub order: Order,
    pub items: Vec<OrderItem>,
}
