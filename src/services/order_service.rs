use std::collections::BTreeSet;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use uuid::Uuid;
use validator::Validate;

use crate::{
    audit,
    db::DbPool,
    dto::orders::{
        BulkOrderAction, BulkOrderRequest, BulkOrderResult, OrderDetail, OrderList,
        UpdateOrderRequest,
    },
    entity::{
        order_items::{Column as OrderItemCol, Entity as OrderItems},
        orders::{self, Column as OrderCol, Entity as Orders},
    },
    error::{AppError, AppResult, FieldErrors},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Order, OrderItem},
    response::{ApiResponse, Meta},
    routes::params::{OrderQuery, filter_value},
    state::AppState,
};

use super::now;

pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderQuery,
) -> AppResult<ApiResponse<OrderList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();

    if let Some(term) = filter_value(&query.q) {
        let pattern = format!("%{}%", term);
        let mut any = Condition::any()
            .add(Expr::col(OrderCol::CustomerEmail).ilike(pattern.clone()))
            .add(Expr::col(OrderCol::CustomerName).ilike(pattern));
        if let Ok(id) = Uuid::parse_str(term) {
            any = any.add(OrderCol::Id.eq(id));
        }
        condition = condition.add(any);
    }
    if let Some(status) = filter_value(&query.status) {
        condition = condition.add(OrderCol::Status.eq(status));
    }
    if let Some(payment_status) = filter_value(&query.payment_status) {
        condition = condition.add(OrderCol::PaymentStatus.eq(payment_status));
    }

    let finder = Orders::find().filter(condition).order_by_desc(OrderCol::Id);
    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Order::from)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Orders", OrderList { items }, Some(meta)))
}

pub async fn get_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<OrderDetail>> {
    ensure_admin(user)?;
    let detail = load_detail(state, id).await?;
    Ok(ApiResponse::success("Order", detail, None))
}

pub async fn update_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateOrderRequest,
) -> AppResult<ApiResponse<OrderDetail>> {
    ensure_admin(user)?;
    let payload = payload.normalize();
    payload.validate()?;
    let existing = match Orders::find_by_id(id).one(&state.orm).await? {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    let mut active: orders::ActiveModel = existing.into();
    active.status = Set(payload.status.trim().to_string());
    active.payment_status = Set(payload.payment_status.trim().to_string());
    active.updated_at = Set(now());
    active.update(&state.orm).await?;

    audit::record(
        &state.orm,
        user,
        "order_update",
        "orders",
        serde_json::json!({ "order_id": id }),
    )
    .await;

    let detail = load_detail(state, id).await?;
    Ok(ApiResponse::success("Order updated", detail, Some(Meta::empty())))
}

/// Cancel, mark-paid, mark-shipped or mark-completed a single order.
pub async fn transition_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    action: BulkOrderAction,
) -> AppResult<ApiResponse<OrderDetail>> {
    ensure_admin(user)?;
    if action == BulkOrderAction::Delete {
        return Err(AppError::BadRequest("use DELETE to remove an order".into()));
    }
    let affected = apply_action(&state.pool, action, &[id]).await?;
    if affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.orm,
        user,
        "order_transition",
        "orders",
        serde_json::json!({ "order_id": id, "action": action }),
    )
    .await;

    let detail = load_detail(state, id).await?;
    Ok(ApiResponse::success(
        success_message(action),
        detail,
        Some(Meta::empty()),
    ))
}

pub async fn delete_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let result = Orders::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.orm,
        user,
        "order_delete",
        "orders",
        serde_json::json!({ "order_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Order deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// Every id must exist; the action then runs as one statement over the whole set.
pub async fn bulk_orders(
    state: &AppState,
    user: &AuthUser,
    payload: BulkOrderRequest,
) -> AppResult<ApiResponse<BulkOrderResult>> {
    ensure_admin(user)?;
    payload.validate()?;
    let ids: Vec<Uuid> = payload.ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();

    let found = Orders::find()
        .filter(OrderCol::Id.is_in(ids.clone()))
        .count(&state.orm)
        .await? as usize;
    if found != ids.len() {
        return Err(AppError::Validation(FieldErrors::single(
            "ids",
            "One or more selected orders do not exist.",
        )));
    }

    let affected = apply_action(&state.pool, payload.action, &ids).await?;

    audit::record(
        &state.orm,
        user,
        "order_bulk",
        "orders",
        serde_json::json!({ "action": payload.action, "ids": ids, "affected": affected }),
    )
    .await;

    Ok(ApiResponse::success(
        "Bulk action applied",
        BulkOrderResult {
            action: payload.action,
            affected,
        },
        Some(Meta::empty()),
    ))
}

async fn apply_action(pool: &DbPool, action: BulkOrderAction, ids: &[Uuid]) -> AppResult<u64> {
    let sql = match action {
        BulkOrderAction::Cancel => {
            r#"
            UPDATE orders
            SET status = 'cancelled',
                payment_status = CASE WHEN payment_status = '' THEN 'unpaid' ELSE payment_status END,
                updated_at = NOW()
            WHERE id = ANY($1)
            "#
        }
        BulkOrderAction::MarkPaid => {
            r#"
            UPDATE orders
            SET status = CASE WHEN status = 'pending' THEN 'paid' ELSE status END,
                payment_status = 'paid',
                updated_at = NOW()
            WHERE id = ANY($1)
            "#
        }
        BulkOrderAction::MarkShipped => {
            "UPDATE orders SET status = 'shipped', updated_at = NOW() WHERE id = ANY($1)"
        }
        BulkOrderAction::MarkCompleted => {
            r#"
            UPDATE orders
            SET status = 'completed', payment_status = 'paid', updated_at = NOW()
            WHERE id = ANY($1)
            "#
        }
        BulkOrderAction::Delete => "DELETE FROM orders WHERE id = ANY($1)",
    };
    let result = sqlx::query(sql).bind(ids).execute(pool).await?;
    Ok(result.rows_affected())
}

fn success_message(action: BulkOrderAction) -> &'static str {
    match action {
        BulkOrderAction::Cancel => "Order cancelled",
        BulkOrderAction::MarkPaid => "Order marked as paid",
        BulkOrderAction::MarkShipped => "Order marked as shipped",
        BulkOrderAction::MarkCompleted => "Order marked as completed",
        BulkOrderAction::Delete => "Order deleted",
    }
}

pub async fn load_detail(state: &AppState, id: Uuid) -> AppResult<OrderDetail> {
    let order = match Orders::find_by_id(id).one(&state.orm).await? {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };
    let items = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(id))
        .order_by_asc(OrderItemCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(OrderItem::from)
        .collect();
    Ok(OrderDetail {
        order: Order::from(order),
        items,
    })
}
