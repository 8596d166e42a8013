use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Order, OrderItem};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateOrderRequest {
    #[validate(length(min = 1, max = 50, message = "The status field is required."))]
    pub status: String,
    #[validate(length(min = 1, max = 50, message = "The payment status field is required."))]
    pub payment_status: String,
}

impl UpdateOrderRequest {
    pub fn normalize(mut self) -> Self {
        self.status = self.status.trim().to_string();
        self.payment_status = self.payment_status.trim().to_string();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum BulkOrderAction {
    Cancel,
    MarkPaid,
    MarkShipped,
    MarkCompleted,
    Delete,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct BulkOrderRequest {
    pub action: BulkOrderAction,
    #[validate(length(min = 1, message = "Select at least one order."))]
    pub ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BulkOrderResult {
    pub action: BulkOrderAction,
    pub affected: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderDetail {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct OrderList {
    #[schema(value_type = Vec<Order>)]
    pub items: Vec<Order>,
}
