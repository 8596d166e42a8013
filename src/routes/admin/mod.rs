use axum::Router;

use crate::state::AppState;

pub mod categories;
pub mod homepage;
pub mod menus;
pub mod orders;
pub mod product_models;
pub mod products;
pub mod users;

/// Back-office routes. Every handler requires an admin bearer token.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/categories", categories::router())
        .nest("/products", products::router())
        .nest("/orders", orders::router())
        .nest("/users", users::router())
        .nest("/menus", menus::router())
        .nest("/product-models", product_models::router())
        .nest("/homepage/sections", homepage::router())
}
