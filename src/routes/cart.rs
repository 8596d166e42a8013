use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};

use crate::{
    dto::cart::{AddToCartRequest, CartView, CheckoutRequest, CheckoutResult, UpdateCartRequest},
    error::AppResult,
    middleware::{auth::AuthUser, session::CartSession},
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(view_cart))
        .route("/add/{slug}", post(add_to_cart))
        .route("/update", post(update_cart))
        .route("/remove/{slug}", post(remove_from_cart))
        .route("/clear", post(clear_cart))
        .route("/checkout-cod", post(checkout_cod))
}

#[utoipa::path(
    get,
    path = "/api/cart",
    params(("x-session-id" = String, Header, description = "Cart session key")),
    responses(
        (status = 200, description = "Cart lines with live prices", body = ApiResponse<CartView>),
        (status = 400, description = "Missing session header")
    ),
    tag = "Cart"
)]
pub async fn view_cart(
    State(state): State<AppState>,
    session: CartSession,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::view_cart(&state, &session).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/cart/add/{slug}",
    params(
        ("slug" = String, Path, description = "Product slug"),
        ("x-session-id" = String, Header, description = "Cart session key")
    ),
    request_body = Option<AddToCartRequest>,
    responses(
        (status = 200, description = "Quantity added to the line", body = ApiResponse<CartView>),
        (status = 404, description = "Unknown product"),
        (status = 422, description = "Quantity out of range")
    ),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    session: CartSession,
    Path(slug): Path<String>,
    payload: Option<Json<AddToCartRequest>>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    let resp = cart_service::add_to_cart(&state, &session, &slug, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/cart/update",
    params(("x-session-id" = String, Header, description = "Cart session key")),
    request_body = UpdateCartRequest,
    responses(
        (status = 200, description = "Lines replaced", body = ApiResponse<CartView>),
        (status = 422, description = "Quantity out of range")
    ),
    tag = "Cart"
)]
pub async fn update_cart(
    State(state): State<AppState>,
    session: CartSession,
    Json(payload): Json<UpdateCartRequest>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::update_cart(&state, &session, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/cart/remove/{slug}",
    params(
        ("slug" = String, Path, description = "Product slug"),
        ("x-session-id" = String, Header, description = "Cart session key")
    ),
    responses(
        (status = 200, description = "Line removed", body = ApiResponse<CartView>),
        (status = 404, description = "Unknown product")
    ),
    tag = "Cart"
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    session: CartSession,
    Path(slug): Path<String>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::remove_from_cart(&state, &session, &slug).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/cart/clear",
    params(("x-session-id" = String, Header, description = "Cart session key")),
    responses((status = 200, description = "Cart emptied", body = ApiResponse<CartView>)),
    tag = "Cart"
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    session: CartSession,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::clear_cart(&state, &session).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/cart/checkout-cod",
    params(("x-session-id" = String, Header, description = "Cart session key")),
    request_body = Option<CheckoutRequest>,
    responses(
        (status = 200, description = "Cash-on-delivery order placed", body = ApiResponse<CheckoutResult>),
        (status = 400, description = "Cart is empty"),
        (status = 422, description = "Validation failed")
    ),
    security((), ("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn checkout_cod(
    State(state): State<AppState>,
    session: CartSession,
    user: Option<AuthUser>,
    payload: Option<Json<CheckoutRequest>>,
) -> AppResult<Json<ApiResponse<CheckoutResult>>> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    let resp = cart_service::checkout_cod(&state, &session, user.as_ref(), payload).await?;
    Ok(Json(resp))
}
