use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    dto::{
        menus::MenuTree,
        store::{HomePage, ProductPage},
    },
    error::AppResult,
    middleware::session::CartSession,
    response::ApiResponse,
    routes::params::StoreQuery,
    services::storefront_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/products/{slug}", get(product_page))
        .route("/menus/{location}", get(menu))
}

#[utoipa::path(
    get,
    path = "/api/store",
    params(
        StoreQuery,
        ("x-session-id" = Option<String>, Header, description = "Cart session key for the item count")
    ),
    responses((status = 200, description = "Storefront home", body = ApiResponse<HomePage>)),
    tag = "Store"
)]
pub async fn home(
    State(state): State<AppState>,
    session: Option<CartSession>,
    Query(query): Query<StoreQuery>,
) -> AppResult<Json<ApiResponse<HomePage>>> {
    let resp = storefront_service::home(&state, session.as_ref(), query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/store/products/{slug}",
    params(("slug" = String, Path, description = "Product slug")),
    responses(
        (status = 200, description = "Product with its rendered layout", body = ApiResponse<ProductPage>),
        (status = 404, description = "Not Found")
    ),
    tag = "Store"
)]
pub async fn product_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<ApiResponse<ProductPage>>> {
    let resp = storefront_service::product_page(&state, &slug).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/store/menus/{location}",
    params(("location" = String, Path, description = "Menu location, e.g. frontend")),
    responses(
        (status = 200, description = "Visible items of the active menu", body = ApiResponse<MenuTree>),
        (status = 404, description = "No active menu at this location")
    ),
    tag = "Store"
)]
pub async fn menu(
    State(state): State<AppState>,
    Path(location): Path<String>,
) -> AppResult<Json<ApiResponse<MenuTree>>> {
    let resp = storefront_service::menu_for_location(&state, &location).await?;
    Ok(Json(resp))
}
