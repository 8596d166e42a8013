use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QuerySelect, Set, TransactionTrait,
};
use sea_orm::sea_query::OnConflict;
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

use crate::{
    audit::log_audit,
    cart::Cart,
    dto::cart::{
        AddToCartRequest, CartLineView, CartView, CheckoutRequest, CheckoutResult,
        UpdateCartRequest,
    },
    entity::{
        cart_sessions::{self, Column as SessionCol, Entity as CartSessions},
        order_items, orders,
        products::{self, Column as ProductCol, Entity as Products},
        users::Entity as Users,
    },
    error::{AppError, AppResult},
    middleware::{auth::AuthUser, session::CartSession},
    models::{Order, OrderItem, Product},
    response::{ApiResponse, Meta},
    state::AppState,
};

use super::now;

pub const STATUS_PLACED: &str = "placed";
pub const PAYMENT_COD: &str = "COD";
pub const PAYMENT_PENDING: &str = "pending";
const GUEST_NAME: &str = "Guest";

/// The stored cart for a session; a missing row is an empty cart.
pub async fn load_cart<C>(db: &C, session_id: &str) -> AppResult<Cart>
where
    C: ConnectionTrait,
{
    let row = CartSessions::find_by_id(session_id.to_string()).one(db).await?;
    Ok(row.map(|row| decode_lines(&row)).unwrap_or_default())
}

/// Persists the cart. An empty cart deletes the session row.
pub async fn save_cart<C>(db: &C, session_id: &str, cart: &Cart) -> AppResult<()>
where
    C: ConnectionTrait,
{
    if cart.is_empty() {
        CartSessions::delete_by_id(session_id.to_string())
            .exec(db)
            .await?;
        return Ok(());
    }

    let lines = serde_json::to_value(cart)
        .map_err(|err| AppError::Internal(anyhow::anyhow!("cart encode failed: {err}")))?;
    let row = cart_sessions::ActiveModel {
        session_id: Set(session_id.to_string()),
        lines: Set(lines),
        updated_at: Set(now()),
    };
    CartSessions::insert(row)
        .on_conflict(
            OnConflict::column(SessionCol::SessionId)
                .update_columns([SessionCol::Lines, SessionCol::UpdatedAt])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    Ok(())
}

fn decode_lines(row: &cart_sessions::Model) -> Cart {
    match serde_json::from_value(row.lines.clone()) {
        Ok(cart) => cart,
        Err(err) => {
            tracing::warn!(session = %row.session_id, error = %err, "discarding unreadable cart");
            Cart::new()
        }
    }
}

pub async fn view_cart(state: &AppState, session: &CartSession) -> AppResult<ApiResponse<CartView>> {
    let cart = load_cart(&state.orm, session.id()).await?;
    let view = build_view(state, &cart).await?;
    Ok(ApiResponse::success("Cart", view, None))
}

/// Adds `qty` (default 1) of the product with `slug` to the session cart.
pub async fn add_to_cart(
    state: &AppState,
    session: &CartSession,
    slug: &str,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartView>> {
    payload.validate()?;
    let product = find_by_slug(state, slug).await?;

    let mut cart = load_cart(&state.orm, session.id()).await?;
    cart.add(product.id, payload.qty.unwrap_or(1));
    save_cart(&state.orm, session.id(), &cart).await?;

    let view = build_view(state, &cart).await?;
    Ok(ApiResponse::success("Added to cart", view, None))
}

/// Replaces every line; `qty = 0` drops the line.
pub async fn update_cart(
    state: &AppState,
    session: &CartSession,
    payload: UpdateCartRequest,
) -> AppResult<ApiResponse<CartView>> {
    payload.validate()?;

    let mut cart = load_cart(&state.orm, session.id()).await?;
    cart.set_lines(payload.lines.iter().map(|line| (line.product_id, line.qty)));
    save_cart(&state.orm, session.id(), &cart).await?;

    let view = build_view(state, &cart).await?;
    Ok(ApiResponse::success("Cart updated", view, None))
}

pub async fn remove_from_cart(
    state: &AppState,
    session: &CartSession,
    slug: &str,
) -> AppResult<ApiResponse<CartView>> {
    let product = find_by_slug(state, slug).await?;

    let mut cart = load_cart(&state.orm, session.id()).await?;
    cart.remove(product.id);
    save_cart(&state.orm, session.id(), &cart).await?;

    let view = build_view(state, &cart).await?;
    Ok(ApiResponse::success("Removed from cart", view, None))
}

pub async fn clear_cart(state: &AppState, session: &CartSession) -> AppResult<ApiResponse<CartView>> {
    save_cart(&state.orm, session.id(), &Cart::new()).await?;
    Ok(ApiResponse::success(
        "Cart cleared",
        CartView {
            items: Vec::new(),
            subtotal: Decimal::ZERO,
            item_count: 0,
        },
        None,
    ))
}

/// Places a cash-on-delivery order from the session cart. Order, items and the cart clear commit
/// together; an empty cart, or one whose products are all gone, is left untouched.
pub async fn checkout_cod(
    state: &AppState,
    session: &CartSession,
    user: Option<&AuthUser>,
    payload: CheckoutRequest,
) -> AppResult<ApiResponse<CheckoutResult>> {
    payload.validate()?;

    let txn = state.orm.begin().await?;
    let row = CartSessions::find_by_id(session.id().to_string())
        .lock_exclusive()
        .one(&txn)
        .await?;
    let cart = row.map(|row| decode_lines(&row)).unwrap_or_default();
    if cart.is_empty() {
        return Err(AppError::EmptyCart("Your cart is empty".into()));
    }

    let products = products_by_id(&txn, cart.product_ids()).await?;
    let lines: Vec<(products::Model, i32)> = cart
        .iter()
        .filter(|(_, qty)| *qty > 0)
        .filter_map(|(id, qty)| products.get(&id).cloned().map(|p| (p, qty)))
        .collect();
    if lines.is_empty() {
        return Err(AppError::EmptyCart("No products found in cart".into()));
    }

    let subtotal: Decimal = lines
        .iter()
        .map(|(product, qty)| product.price * Decimal::from(*qty))
        .sum();

    let account = match user {
        Some(user) => Users::find_by_id(user.user_id).one(&txn).await?,
        None => None,
    };
    let customer_name = filled(payload.customer_name)
        .or_else(|| account.as_ref().map(|a| a.name.clone()))
        .unwrap_or_else(|| GUEST_NAME.to_string());
    let customer_email =
        filled(payload.customer_email).or_else(|| account.as_ref().map(|a| a.email.clone()));

    let order = orders::ActiveModel {
        id: Set(Uuid::now_v7()),
        user_id: Set(user.map(|u| u.user_id)),
        status: Set(STATUS_PLACED.into()),
        payment_method: Set(PAYMENT_COD.into()),
        payment_status: Set(PAYMENT_PENDING.into()),
        subtotal: Set(subtotal),
        tax: Set(Decimal::ZERO),
        shipping: Set(Decimal::ZERO),
        total: Set(subtotal),
        customer_name: Set(customer_name),
        customer_email: Set(customer_email),
        customer_phone: Set(filled(payload.customer_phone)),
        ship_line1: Set(filled(payload.ship_line1).unwrap_or_default()),
        ship_line2: Set(filled(payload.ship_line2)),
        ship_city: Set(filled(payload.ship_city).unwrap_or_default()),
        ship_state: Set(filled(payload.ship_state)),
        ship_postal_code: Set(filled(payload.ship_postal_code)),
        ship_country: Set(filled(payload.ship_country).unwrap_or_default()),
        placed_at: Set(Some(now())),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await?;

    let mut items = Vec::with_capacity(lines.len());
    for (product, qty) in lines {
        let quantity = Decimal::from(qty);
        let item = order_items::ActiveModel {
            id: Set(Uuid::now_v7()),
            order_id: Set(order.id),
            product_id: Set(Some(product.id)),
            product_name: Set(product.name),
            quantity: Set(qty),
            unit_price: Set(product.price),
            total: Set(product.price * quantity),
            created_at: NotSet,
        }
        .insert(&txn)
        .await?;
        items.push(OrderItem::from(item));
    }

    CartSessions::delete_by_id(session.id().to_string())
        .exec(&txn)
        .await?;
    txn.commit().await?;

    tracing::info!(order_id = %order.id, total = %order.total, "cod order placed");
    if let Err(err) = log_audit(
        &state.orm,
        user.map(|u| u.user_id),
        "order_place",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id, "total": order.total })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Order placed",
        CheckoutResult {
            order: Order::from(order),
            items,
        },
        Some(Meta::empty()),
    ))
}

async fn find_by_slug(state: &AppState, slug: &str) -> AppResult<products::Model> {
    match Products::find()
        .filter(ProductCol::Slug.eq(slug))
        .one(&state.orm)
        .await?
    {
        Some(p) => Ok(p),
        None => Err(AppError::NotFound),
    }
}

async fn products_by_id<C>(db: &C, ids: Vec<Uuid>) -> AppResult<HashMap<Uuid, products::Model>>
where
    C: ConnectionTrait,
{
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    Ok(Products::find()
        .filter(ProductCol::Id.is_in(ids))
        .all(db)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect())
}

/// Cart lines in insertion order with live product data. Lines whose product is gone are skipped.
async fn build_view(state: &AppState, cart: &Cart) -> AppResult<CartView> {
    let mut products = products_by_id(&state.orm, cart.product_ids()).await?;
    let mut items = Vec::with_capacity(cart.len());
    let mut subtotal = Decimal::ZERO;
    let mut item_count = 0i64;

    for (id, qty) in cart.iter() {
        let Some(product) = products.remove(&id) else {
            continue;
        };
        let line_total = product.price * Decimal::from(qty);
        subtotal += line_total;
        item_count += i64::from(qty);
        items.push(CartLineView {
            product: Product::from(product),
            qty,
            line_total,
        });
    }

    Ok(CartView {
        items,
        subtotal,
        item_count,
    })
}

fn filled(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
