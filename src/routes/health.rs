use axum::{Json, extract::State};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    response::{ApiResponse, Meta},
    state::AppState,
};

#[derive(Serialize, ToSchema)]
pub struct HealthData {
    status: String,
    database: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service and database status", body = ApiResponse<HealthData>),
    ),
    tag = "Health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<HealthData>> {
    let database = match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => "ok",
        Err(err) => {
            tracing::warn!(error = %err, "health check could not reach the database");
            "unavailable"
        }
    };

    Json(ApiResponse::success(
        "Health check",
        HealthData {
            status: "ok".to_string(),
            database: database.to_string(),
        },
        Some(Meta::empty()),
    ))
}
