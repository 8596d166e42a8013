use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    entity::{
        categories, homepage_sections, menu_items, menus, order_items, orders, product_models,
        products, users,
    },
    error::AppError,
    layout::ModelDefinition,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            is_admin: model.is_admin,
            email_verified_at: model.email_verified_at.map(|at| at.with_timezone(&Utc)),
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<categories::Model> for Category {
    fn from(model: categories::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
            description: model.description,
            parent_id: model.parent_id,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub category_id: Option<Uuid>,
    pub product_model_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub sku: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<products::Model> for Product {
    fn from(model: products::Model) -> Self {
        Self {
            id: model.id,
            category_id: model.category_id,
            product_model_id: model.product_model_id,
            name: model.name,
            slug: model.slug,
            sku: model.sku,
            description: model.description,
            price: model.price,
            stock: model.stock,
            image_url: model.image_url,
            is_active: model.is_active,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductModel {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
    pub preview_product_id: Option<Uuid>,
    #[schema(value_type = Object)]
    pub definition: ModelDefinition,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductModel {
    /// The definition products should render with, if this model is switched on.
    pub fn active_definition(&self) -> Option<&ModelDefinition> {
        self.is_active.then_some(&self.definition)
    }
}

impl TryFrom<product_models::Model> for ProductModel {
    type Error = AppError;

    fn try_from(model: product_models::Model) -> Result<Self, Self::Error> {
        let definition: ModelDefinition = serde_json::from_value(model.definition).map_err(|err| {
            AppError::Internal(anyhow::anyhow!(
                "product model {} has an unreadable definition: {err}",
                model.id
            ))
        })?;
        Ok(Self {
            id: model.id,
            name: model.name,
            is_active: model.is_active,
            preview_product_id: model.preview_product_id,
            definition,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub status: String,
    pub payment_method: String,
    pub payment_status: String,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub ship_line1: String,
    pub ship_line2: Option<String>,
    pub ship_city: String,
    pub ship_state: Option<String>,
    pub ship_postal_code: Option<String>,
    pub ship_country: String,
    pub placed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<orders::Model> for Order {
    fn from(model: orders::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            status: model.status,
            payment_method: model.payment_method,
            payment_status: model.payment_status,
            subtotal: model.subtotal,
            tax: model.tax,
            shipping: model.shipping,
            total: model.total,
            customer_name: model.customer_name,
            customer_email: model.customer_email,
            customer_phone: model.customer_phone,
            ship_line1: model.ship_line1,
            ship_line2: model.ship_line2,
            ship_city: model.ship_city,
            ship_state: model.ship_state,
            ship_postal_code: model.ship_postal_code,
            ship_country: model.ship_country,
            placed_at: model.placed_at.map(|at| at.with_timezone(&Utc)),
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Option<Uuid>,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<order_items::Model> for OrderItem {
    fn from(model: order_items::Model) -> Self {
        Self {
            id: model.id,
            order_id: model.order_id,
            product_id: model.product_id,
            product_name: model.product_name,
            quantity: model.quantity,
            unit_price: model.unit_price,
            total: model.total,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Menu {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<menus::Model> for Menu {
    fn from(model: menus::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            location: model.location,
            is_active: model.is_active,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MenuItem {
    pub id: Uuid,
    pub menu_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub title: String,
    pub url: String,
    pub position: i32,
    pub target: String,
    pub visible: bool,
    pub icon: Option<String>,
    pub align: String,
}

impl From<menu_items::Model> for MenuItem {
    fn from(model: menu_items::Model) -> Self {
        Self {
            id: model.id,
            menu_id: model.menu_id,
            parent_id: model.parent_id,
            title: model.title,
            url: model.url,
            position: model.position,
            target: model.target,
            visible: model.visible,
            icon: model.icon,
            align: model.align,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HomepageSection {
    pub id: Uuid,
    pub title: String,
    pub is_active: bool,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<homepage_sections::Model> for HomepageSection {
    fn from(model: homepage_sections::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            is_active: model.is_active,
            position: model.position,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}
