use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::homepage::{
        ReorderSectionsRequest, SectionDetail, SectionList, SectionRequest, SectionWithCategories,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    routes::params::SearchQuery,
    services::homepage_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sections).post(create_section))
        .route("/reorder", post(reorder_sections))
        .route(
            "/{id}",
            get(get_section).put(update_section).delete(delete_section),
        )
}

#[utoipa::path(
    get,
    path = "/api/admin/homepage/sections",
    params(SearchQuery),
    responses(
        (status = 200, description = "Sections by position with their categories", body = ApiResponse<SectionList>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_sections(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<SectionList>>> {
    let resp = homepage_service::list_sections(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/homepage/sections/{id}",
    params(("id" = Uuid, Path, description = "Section ID")),
    responses(
        (status = 200, description = "Section editor data", body = ApiResponse<SectionDetail>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_section(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<SectionDetail>>> {
    let resp = homepage_service::get_section(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/homepage/sections",
    request_body = SectionRequest,
    responses(
        (status = 200, description = "Section created", body = ApiResponse<SectionWithCategories>),
        (status = 422, description = "Validation failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_section(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<SectionRequest>,
) -> AppResult<Json<ApiResponse<SectionWithCategories>>> {
    let resp = homepage_service::create_section(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/homepage/sections/{id}",
    params(("id" = Uuid, Path, description = "Section ID")),
    request_body = SectionRequest,
    responses(
        (status = 200, description = "Section and category links saved", body = ApiResponse<SectionWithCategories>),
        (status = 404, description = "Not Found"),
        (status = 422, description = "Validation failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_section(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SectionRequest>,
) -> AppResult<Json<ApiResponse<SectionWithCategories>>> {
    let resp = homepage_service::update_section(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/homepage/sections/{id}",
    params(("id" = Uuid, Path, description = "Section ID")),
    responses(
        (status = 200, description = "Section deleted"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_section(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = homepage_service::delete_section(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/homepage/sections/reorder",
    request_body = ReorderSectionsRequest,
    responses(
        (status = 200, description = "Positions saved"),
        (status = 422, description = "Unknown section ids")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn reorder_sections(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ReorderSectionsRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = homepage_service::reorder_sections(&state, &user, payload).await?;
    Ok(Json(resp))
}
