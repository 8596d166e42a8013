use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    audit,
    dto::style::{StyleQuery, StyleView, UpdateStyleRequest},
    entity::home_card_styles::{self, Column as StyleCol, Entity as HomeCardStyles},
    error::{AppError, AppResult, FieldErrors},
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
    state::AppState,
    style::{StoredStyle, StyleDocument},
};

use super::now;

async fn first_row(state: &AppState) -> AppResult<Option<home_card_styles::Model>> {
    Ok(HomeCardStyles::find()
        .order_by_asc(StyleCol::CreatedAt)
        .order_by_asc(StyleCol::Id)
        .one(&state.orm)
        .await?)
}

fn parse_stored(row: &home_card_styles::Model) -> AppResult<StoredStyle> {
    StoredStyle::from_value(row.style.clone()).map_err(|err| {
        AppError::Internal(anyhow::anyhow!("stored card style {} is unreadable: {err}", row.id))
    })
}

/// Read-only view used by the storefront: defaults when nothing is stored, legacy documents
/// normalized in memory.
pub async fn read_document(state: &AppState) -> AppResult<StyleDocument> {
    match first_row(state).await? {
        Some(row) => Ok(parse_stored(&row)?.into_document()),
        None => Ok(StyleDocument::default()),
    }
}

/// Editor view. Creates the default row on first use and rewrites a legacy flat document into
/// the scoped shape.
pub async fn get_style(
    state: &AppState,
    _user: &AuthUser,
    query: StyleQuery,
) -> AppResult<ApiResponse<StyleView>> {
    let document = match first_row(state).await? {
        Some(row) => {
            let stored = parse_stored(&row)?;
            if stored.is_legacy() {
                let document = stored.into_document();
                let mut active: home_card_styles::ActiveModel = row.into();
                active.style = Set(document.to_value());
                active.updated_at = Set(now());
                active.update(&state.orm).await?;
                tracing::info!("migrated legacy card style to scoped document");
                document
            } else {
                stored.into_document()
            }
        }
        None => {
            let document = StyleDocument::default();
            home_card_styles::ActiveModel {
                id: Set(Uuid::now_v7()),
                style: Set(document.to_value()),
                created_at: NotSet,
                updated_at: NotSet,
            }
            .insert(&state.orm)
            .await?;
            document
        }
    };

    let scope = query.scope.unwrap_or_default();
    Ok(ApiResponse::success(
        "Card style",
        StyleView {
            scope,
            style: document.scope(scope).clone(),
            document,
        },
        None,
    ))
}

/// Accepts a scoped or flat document, stores it scoped.
pub async fn update_style(
    state: &AppState,
    user: &AuthUser,
    query: StyleQuery,
    payload: UpdateStyleRequest,
) -> AppResult<ApiResponse<StyleView>> {
    let stored = StoredStyle::from_value(payload.style)
        .map_err(|err| AppError::Validation(FieldErrors::single("style", err.to_string())))?;
    let document = stored.into_document().enforce_cta();

    match first_row(state).await? {
        Some(row) => {
            let mut active: home_card_styles::ActiveModel = row.into();
            active.style = Set(document.to_value());
            active.updated_at = Set(now());
            active.update(&state.orm).await?;
        }
        None => {
            home_card_styles::ActiveModel {
                id: Set(Uuid::now_v7()),
                style: Set(document.to_value()),
                created_at: NotSet,
                updated_at: NotSet,
            }
            .insert(&state.orm)
            .await?;
        }
    }

    audit::record(
        &state.orm,
        user,
        "card_style_update",
        "home_card_styles",
        serde_json::json!({}),
    )
    .await;

    let scope = query.scope.unwrap_or_default();
    Ok(ApiResponse::success(
        "Home style updated",
        StyleView {
            scope,
            style: document.scope(scope).clone(),
            document,
        },
        Some(Meta::empty()),
    ))
}
