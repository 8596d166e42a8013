#![allow(dead_code)]

use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, Statement};
use storefront_api::{
    db::{connect_state, run_migrations},
    dto::{categories::CategoryRequest, products::ProductRequest, users::CreateUserRequest},
    middleware::auth::{AuthUser, ROLE_ADMIN, ROLE_USER},
    models::{Category, Product},
    services::{auth_service::hash_password, category_service, product_service},
    state::AppState,
};
use uuid::Uuid;

/// Database URL for flow tests, or `None` to skip them.
pub fn database_url() -> Option<String> {
    match std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
        Ok(url) => Some(url),
        Err(_) => {
            eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests.");
            None
        }
    }
}

pub async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let state = connect_state(database_url, 5).await?;
    run_migrations(&state.pool).await?;

    let backend = state.orm.get_database_backend();
    state
        .orm
        .execute(Statement::from_string(
            backend,
            "TRUNCATE TABLE order_items, orders, cart_sessions, homepage_section_categories, \
             homepage_sections, home_card_styles, menu_items, menus, products, product_models, \
             categories, audit_logs, users CASCADE",
        ))
        .await?;

    Ok(state)
}

pub async fn create_account(
    state: &AppState,
    name: &str,
    email: &str,
    is_admin: bool,
) -> anyhow::Result<AuthUser> {
    let id = Uuid::now_v7();
    sqlx::query(
        "INSERT INTO users (id, name, email, password_hash, is_admin) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(hash_password("secret123")?)
    .bind(is_admin)
    .execute(&state.pool)
    .await?;

    Ok(AuthUser {
        user_id: id,
        role: if is_admin { ROLE_ADMIN } else { ROLE_USER }.to_string(),
    })
}

pub async fn create_category(state: &AppState, admin: &AuthUser, name: &str) -> anyhow::Result<Category> {
    let resp = category_service::create_category(
        state,
        admin,
        CategoryRequest {
            name: name.into(),
            slug: None,
            description: None,
            parent_id: None,
        },
    )
    .await?;
    Ok(resp.data.expect("category"))
}

pub fn product_request(name: &str, price: Decimal, category_id: Option<Uuid>) -> ProductRequest {
    ProductRequest {
        name: name.into(),
        slug: None,
        sku: None,
        category_id,
        product_model_id: None,
        description: None,
        price,
        stock: 10,
        image_url: None,
        is_active: None,
    }
}

pub async fn create_product(
    state: &AppState,
    admin: &AuthUser,
    request: ProductRequest,
) -> anyhow::Result<Product> {
    let resp = product_service::create_product(state, admin, request).await?;
    Ok(resp.data.expect("product"))
}

pub fn new_user_request(name: &str, email: &str) -> CreateUserRequest {
    CreateUserRequest {
        name: name.into(),
        email: email.into(),
        password: "secret123".into(),
        is_admin: false,
    }
}
