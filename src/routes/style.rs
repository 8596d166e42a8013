use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::style::{StyleQuery, StyleView, UpdateStyleRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::style_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/home-style", get(get_style).put(update_style))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/home-style",
    params(StyleQuery),
    responses(
        (status = 200, description = "Card style for the scope, normalized", body = ApiResponse<StyleView>),
        (status = 400, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
pub async fn get_style(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<StyleQuery>,
) -> AppResult<Json<ApiResponse<StyleView>>> {
    let resp = style_service::get_style(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/dashboard/home-style",
    params(StyleQuery),
    request_body = UpdateStyleRequest,
    responses(
        (status = 200, description = "Style saved", body = ApiResponse<StyleView>),
        (status = 422, description = "Style is not an object")
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
pub async fn update_style(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<StyleQuery>,
    Json(payload): Json<UpdateStyleRequest>,
) -> AppResult<Json<ApiResponse<StyleView>>> {
    let resp = style_service::update_style(&state, &user, query, payload).await?;
    Ok(Json(resp))
}
