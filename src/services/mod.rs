use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;

pub mod auth_service;
pub mod cart_service;
pub mod category_service;
pub mod homepage_service;
pub mod menu_service;
pub mod order_service;
pub mod product_model_service;
pub mod product_service;
pub mod storefront_service;
pub mod style_service;
pub mod user_service;

/// Timestamp for `updated_at` columns.
pub(crate) fn now() -> DateTimeWithTimeZone {
    Utc::now().fixed_offset()
}
