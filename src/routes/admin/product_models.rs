use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, put},
};
use uuid::Uuid;

use crate::{
    dto::product_models::{
        CreateProductModelRequest, ProductModelEditor, ProductModelList, UpdateDefinitionRequest,
        UpdateProductModelRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::ProductModel,
    response::ApiResponse,
    routes::params::SearchQuery,
    services::product_model_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_models).post(create_model))
        .route("/{id}", get(get_model).put(update_model).delete(delete_model))
        .route("/{id}/definition", put(update_definition))
}

#[utoipa::path(
    get,
    path = "/api/admin/product-models",
    params(SearchQuery),
    responses(
        (status = 200, description = "Product models by name", body = ApiResponse<ProductModelList>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_models(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<ProductModelList>>> {
    let resp = product_model_service::list_product_models(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/product-models/{id}",
    params(("id" = Uuid, Path, description = "Product model ID")),
    responses(
        (status = 200, description = "Model with preview product and rendered preview", body = ApiResponse<ProductModelEditor>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_model(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ProductModelEditor>>> {
    let resp = product_model_service::get_editor(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/product-models",
    request_body = CreateProductModelRequest,
    responses(
        (status = 200, description = "Model created with the starter layout unless one is given", body = ApiResponse<ProductModel>),
        (status = 422, description = "Validation failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_model(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateProductModelRequest>,
) -> AppResult<Json<ApiResponse<ProductModel>>> {
    let resp = product_model_service::create_product_model(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/product-models/{id}",
    params(("id" = Uuid, Path, description = "Product model ID")),
    request_body = UpdateProductModelRequest,
    responses(
        (status = 200, description = "Model updated", body = ApiResponse<ProductModel>),
        (status = 404, description = "Not Found"),
        (status = 422, description = "Validation failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_model(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductModelRequest>,
) -> AppResult<Json<ApiResponse<ProductModel>>> {
    let resp = product_model_service::update_product_model(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/product-models/{id}/definition",
    params(("id" = Uuid, Path, description = "Product model ID")),
    request_body = UpdateDefinitionRequest,
    responses(
        (status = 200, description = "Definition replaced", body = ApiResponse<ProductModel>),
        (status = 404, description = "Not Found"),
        (status = 422, description = "Invalid definition")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_definition(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDefinitionRequest>,
) -> AppResult<Json<ApiResponse<ProductModel>>> {
    let resp = product_model_service::update_definition(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/product-models/{id}",
    params(("id" = Uuid, Path, description = "Product model ID")),
    responses(
        (status = 200, description = "Model deleted"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_model(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = product_model_service::delete_product_model(&state, &user, id).await?;
    Ok(Json(resp))
}
