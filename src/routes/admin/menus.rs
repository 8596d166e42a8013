use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::menus::{MenuItemRequest, MenuList, MenuRequest, MenuTree, ReorderMenuRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Menu, MenuItem},
    response::ApiResponse,
    routes::params::SearchQuery,
    services::menu_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_menus).post(create_menu))
        .route("/{id}", get(get_menu).put(update_menu).delete(delete_menu))
        .route("/{id}/items", post(add_item))
        .route("/{id}/items/{item_id}", put(update_item).delete(delete_item))
        .route("/{id}/reorder", post(reorder_items))
}

#[utoipa::path(
    get,
    path = "/api/admin/menus",
    params(SearchQuery),
    responses(
        (status = 200, description = "Menus by name", body = ApiResponse<MenuList>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_menus(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<MenuList>>> {
    let resp = menu_service::list_menus(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/menus/{id}",
    params(("id" = Uuid, Path, description = "Menu ID")),
    responses(
        (status = 200, description = "Menu with its item tree", body = ApiResponse<MenuTree>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_menu(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<MenuTree>>> {
    let resp = menu_service::get_menu(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/menus",
    request_body = MenuRequest,
    responses(
        (status = 200, description = "Menu created", body = ApiResponse<Menu>),
        (status = 422, description = "Validation failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_menu(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<MenuRequest>,
) -> AppResult<Json<ApiResponse<Menu>>> {
    let resp = menu_service::create_menu(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/menus/{id}",
    params(("id" = Uuid, Path, description = "Menu ID")),
    request_body = MenuRequest,
    responses(
        (status = 200, description = "Menu updated", body = ApiResponse<Menu>),
        (status = 404, description = "Not Found"),
        (status = 422, description = "Validation failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_menu(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<MenuRequest>,
) -> AppResult<Json<ApiResponse<Menu>>> {
    let resp = menu_service::update_menu(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/menus/{id}",
    params(("id" = Uuid, Path, description = "Menu ID")),
    responses(
        (status = 200, description = "Menu and its items deleted"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_menu(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = menu_service::delete_menu(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/menus/{id}/items",
    params(("id" = Uuid, Path, description = "Menu ID")),
    request_body = MenuItemRequest,
    responses(
        (status = 200, description = "Item appended after its siblings", body = ApiResponse<MenuItem>),
        (status = 404, description = "Not Found"),
        (status = 422, description = "Validation failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn add_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<MenuItemRequest>,
) -> AppResult<Json<ApiResponse<MenuItem>>> {
    let resp = menu_service::add_item(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/menus/{id}/items/{item_id}",
    params(
        ("id" = Uuid, Path, description = "Menu ID"),
        ("item_id" = Uuid, Path, description = "Menu item ID")
    ),
    request_body = MenuItemRequest,
    responses(
        (status = 200, description = "Item updated", body = ApiResponse<MenuItem>),
        (status = 404, description = "Not Found"),
        (status = 422, description = "Validation failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<MenuItemRequest>,
) -> AppResult<Json<ApiResponse<MenuItem>>> {
    let resp = menu_service::update_item(&state, &user, id, item_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/menus/{id}/items/{item_id}",
    params(
        ("id" = Uuid, Path, description = "Menu ID"),
        ("item_id" = Uuid, Path, description = "Menu item ID")
    ),
    responses(
        (status = 200, description = "Item deleted"),
        (status = 404, description = "Not Found or item of another menu")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = menu_service::delete_item(&state, &user, id, item_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/menus/{id}/reorder",
    params(("id" = Uuid, Path, description = "Menu ID")),
    request_body = ReorderMenuRequest,
    responses(
        (status = 200, description = "Positions and parents saved", body = ApiResponse<MenuTree>),
        (status = 404, description = "Not Found"),
        (status = 422, description = "Validation failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn reorder_items(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReorderMenuRequest>,
) -> AppResult<Json<ApiResponse<MenuTree>>> {
    let resp = menu_service::reorder_items(&state, &user, id, payload).await?;
    Ok(Json(resp))
}
