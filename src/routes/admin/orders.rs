use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::orders::{
        BulkOrderAction, BulkOrderRequest, BulkOrderResult, OrderDetail, OrderList,
        UpdateOrderRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    routes::params::OrderQuery,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders))
        .route("/bulk", post(bulk_orders))
        .route("/{id}", get(get_order).put(update_order).delete(delete_order))
        .route("/{id}/cancel", post(cancel_order))
        .route("/{id}/mark-paid", post(mark_paid))
        .route("/{id}/mark-shipped", post(mark_shipped))
        .route("/{id}/mark-completed", post(mark_completed))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders",
    params(OrderQuery),
    responses(
        (status = 200, description = "Orders, newest first", body = ApiResponse<OrderList>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<OrderQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = order_service::list_orders(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order with items", body = ApiResponse<OrderDetail>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let resp = order_service::get_order(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/orders/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Status and payment status saved", body = ApiResponse<OrderDetail>),
        (status = 404, description = "Not Found"),
        (status = 422, description = "Validation failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrderRequest>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let resp = order_service::update_order(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/orders/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order deleted"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = order_service::delete_order(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/orders/{id}/cancel",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order cancelled", body = ApiResponse<OrderDetail>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn cancel_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let resp = order_service::transition_order(&state, &user, id, BulkOrderAction::Cancel).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/orders/{id}/mark-paid",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order marked paid", body = ApiResponse<OrderDetail>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn mark_paid(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let resp =
        order_service::transition_order(&state, &user, id, BulkOrderAction::MarkPaid).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/orders/{id}/mark-shipped",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order marked shipped", body = ApiResponse<OrderDetail>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn mark_shipped(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let resp =
        order_service::transition_order(&state, &user, id, BulkOrderAction::MarkShipped).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/orders/{id}/mark-completed",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order completed and paid", body = ApiResponse<OrderDetail>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn mark_completed(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let resp =
        order_service::transition_order(&state, &user, id, BulkOrderAction::MarkCompleted).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/orders/bulk",
    request_body = BulkOrderRequest,
    responses(
        (status = 200, description = "Action applied to every selected order", body = ApiResponse<BulkOrderResult>),
        (status = 422, description = "Unknown order ids or empty selection")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn bulk_orders(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<BulkOrderRequest>,
) -> AppResult<Json<ApiResponse<BulkOrderResult>>> {
    let resp = order_service::bulk_orders(&state, &user, payload).await?;
    Ok(Json(resp))
}
