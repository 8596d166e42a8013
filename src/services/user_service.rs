use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use uuid::Uuid;
use validator::Validate;

use crate::{
    audit,
    dto::users::{CreateUserRequest, UpdateUserRequest, UserList},
    entity::users::{self, Column as UserCol, Entity as Users},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::User,
    response::{ApiResponse, Meta},
    routes::params::SearchQuery,
    services::auth_service::{ensure_email_free, hash_password},
    state::AppState,
};

use super::now;

pub async fn list_users(
    state: &AppState,
    user: &AuthUser,
    query: SearchQuery,
) -> AppResult<ApiResponse<UserList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();
    if let Some(term) = query.term() {
        let pattern = format!("%{}%", term);
        condition = condition.add(
            Condition::any()
                .add(Expr::col(UserCol::Name).ilike(pattern.clone()))
                .add(Expr::col(UserCol::Email).ilike(pattern)),
        );
    }

    let finder = Users::find().filter(condition).order_by_desc(UserCol::Id);
    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(User::from)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Users", UserList { items }, Some(meta)))
}

pub async fn get_user(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<ApiResponse<User>> {
    ensure_admin(user)?;
    let found = find_user(state, id).await?;
    Ok(ApiResponse::success("User", User::from(found), None))
}

pub async fn create_user(
    state: &AppState,
    user: &AuthUser,
    payload: CreateUserRequest,
) -> AppResult<ApiResponse<User>> {
    ensure_admin(user)?;
    let payload = payload.normalize();
    payload.validate()?;
    ensure_email_free(state, &payload.email, None).await?;

    let created = users::ActiveModel {
        id: Set(Uuid::now_v7()),
        name: Set(payload.name),
        email: Set(payload.email),
        password_hash: Set(hash_password(&payload.password)?),
        is_admin: Set(payload.is_admin),
        email_verified_at: Set(None),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.orm,
        user,
        "user_create",
        "users",
        serde_json::json!({ "user_id": created.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "User created",
        User::from(created),
        Some(Meta::empty()),
    ))
}

pub async fn update_user(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateUserRequest,
) -> AppResult<ApiResponse<User>> {
    ensure_admin(user)?;
    let payload = payload.normalize();
    payload.validate()?;
    let existing = find_user(state, id).await?;
    ensure_email_free(state, &payload.email, Some(id)).await?;

    if id == user.user_id && payload.is_admin == Some(false) {
        return Err(AppError::BadRequest("You cannot demote yourself".into()));
    }

    let mut active: users::ActiveModel = existing.into();
    active.name = Set(payload.name);
    active.email = Set(payload.email);
    if let Some(password) = payload.password {
        active.password_hash = Set(hash_password(&password)?);
    }
    if let Some(is_admin) = payload.is_admin {
        active.is_admin = Set(is_admin);
    }
    active.updated_at = Set(now());
    let updated = active.update(&state.orm).await?;

    audit::record(
        &state.orm,
        user,
        "user_update",
        "users",
        serde_json::json!({ "user_id": updated.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        User::from(updated),
        Some(Meta::empty()),
    ))
}

pub async fn delete_user(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    if id == user.user_id {
        return Err(AppError::BadRequest("You cannot delete yourself".into()));
    }
    let result = Users::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.orm,
        user,
        "user_delete",
        "users",
        serde_json::json!({ "user_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// Grants or revokes admin. Admins cannot revoke their own flag.
pub async fn set_admin(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    is_admin: bool,
) -> AppResult<ApiResponse<User>> {
    ensure_admin(user)?;
    if !is_admin && id == user.user_id {
        return Err(AppError::BadRequest("You cannot demote yourself".into()));
    }
    let existing = find_user(state, id).await?;

    let mut active: users::ActiveModel = existing.into();
    active.is_admin = Set(is_admin);
    active.updated_at = Set(now());
    let updated = active.update(&state.orm).await?;

    let action = if is_admin { "user_promote" } else { "user_demote" };
    audit::record(
        &state.orm,
        user,
        action,
        "users",
        serde_json::json!({ "user_id": id }),
    )
    .await;

    let message = if is_admin { "User promoted" } else { "User demoted" };
    Ok(ApiResponse::success(
        message,
        User::from(updated),
        Some(Meta::empty()),
    ))
}

async fn find_user(state: &AppState, id: Uuid) -> AppResult<users::Model> {
    match Users::find_by_id(id).one(&state.orm).await? {
        Some(u) => Ok(u),
        None => Err(AppError::NotFound),
    }
}
