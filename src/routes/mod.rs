use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod auth;
pub mod cart;
pub mod doc;
pub mod health;
pub mod params;
pub mod store;
pub mod style;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/store", store::router())
        .nest("/cart", cart::router())
        .nest("/dashboard", style::router())
        .nest("/admin", admin::router())
}
