use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use uuid::Uuid;
use validator::Validate;

use crate::{
    audit,
    dto::categories::{CategoryList, CategoryRequest, CategoryRow},
    entity::categories::{self, Column as CategoryCol, Entity as Categories},
    error::{AppError, AppResult, FieldErrors},
    middleware::auth::{AuthUser, ensure_admin},
    models::Category,
    response::{ApiResponse, Meta},
    routes::params::{CATEGORY_PER_PAGE, SearchQuery},
    slug::{CATEGORY_SUFFIX_LEN, candidate_slug},
    state::AppState,
};

use super::now;

pub async fn list_categories(
    state: &AppState,
    user: &AuthUser,
    query: SearchQuery,
) -> AppResult<ApiResponse<CategoryList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination().normalize_with(CATEGORY_PER_PAGE);
    let mut condition = Condition::all();
    if let Some(term) = query.term() {
        let pattern = format!("%{}%", term);
        condition = condition.add(
            Condition::any()
                .add(Expr::col(CategoryCol::Name).ilike(pattern.clone()))
                .add(Expr::col(CategoryCol::Slug).ilike(pattern)),
        );
    }

    let finder = Categories::find()
        .filter(condition)
        .order_by_asc(CategoryCol::Name)
        .order_by_asc(CategoryCol::Id);
    let total = finder.clone().count(&state.orm).await? as i64;
    let rows = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let parent_ids: Vec<Uuid> = rows.iter().filter_map(|c| c.parent_id).collect();
    let parents: HashMap<Uuid, String> = if parent_ids.is_empty() {
        HashMap::new()
    } else {
        Categories::find()
            .filter(CategoryCol::Id.is_in(parent_ids))
            .all(&state.orm)
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect()
    };

    let items = rows
        .into_iter()
        .map(|c| CategoryRow {
            parent_name: c.parent_id.and_then(|id| parents.get(&id).cloned()),
            category: Category::from(c),
        })
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Categories", CategoryList { items }, Some(meta)))
}

pub async fn get_category(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Category>> {
    ensure_admin(user)?;
    let category = match Categories::find_by_id(id).one(&state.orm).await? {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Category", Category::from(category), None))
}

pub async fn create_category(
    state: &AppState,
    user: &AuthUser,
    payload: CategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    ensure_admin(user)?;
    let payload = payload.normalize();
    payload.validate()?;
    check_parent(state, payload.parent_id, None).await?;

    let slug = match payload.slug {
        Some(slug) => {
            ensure_slug_free(state, &slug, None).await?;
            slug
        }
        None => generate_slug(state, &payload.name).await?,
    };

    let category = categories::ActiveModel {
        id: Set(Uuid::now_v7()),
        name: Set(payload.name),
        slug: Set(slug),
        description: Set(payload.description),
        parent_id: Set(payload.parent_id),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.orm,
        user,
        "category_create",
        "categories",
        serde_json::json!({ "category_id": category.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Category created",
        Category::from(category),
        Some(Meta::empty()),
    ))
}

pub async fn update_category(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: CategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    ensure_admin(user)?;
    let payload = payload.normalize();
    payload.validate()?;

    let existing = match Categories::find_by_id(id).one(&state.orm).await? {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };

    let Some(slug) = payload.slug else {
        return Err(AppError::Validation(FieldErrors::single(
            "slug",
            "The slug field is required.",
        )));
    };
    ensure_slug_free(state, &slug, Some(id)).await?;
    check_parent(state, payload.parent_id, Some(id)).await?;

    let mut active: categories::ActiveModel = existing.into();
    active.name = Set(payload.name);
    active.slug = Set(slug);
    active.description = Set(payload.description);
    active.parent_id = Set(payload.parent_id);
    active.updated_at = Set(now());
    let category = active.update(&state.orm).await?;

    audit::record(
        &state.orm,
        user,
        "category_update",
        "categories",
        serde_json::json!({ "category_id": category.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        Category::from(category),
        Some(Meta::empty()),
    ))
}

pub async fn delete_category(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let result = Categories::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.orm,
        user,
        "category_delete",
        "categories",
        serde_json::json!({ "category_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

async fn check_parent(state: &AppState, parent_id: Option<Uuid>, own_id: Option<Uuid>) -> AppResult<()> {
    let Some(parent_id) = parent_id else {
        return Ok(());
    };
    if Some(parent_id) == own_id {
        return Err(AppError::Validation(FieldErrors::single(
            "parent_id",
            "A category cannot be its own parent.",
        )));
    }
    if Categories::find_by_id(parent_id).one(&state.orm).await?.is_none() {
        return Err(AppError::Validation(FieldErrors::single(
            "parent_id",
            "The selected parent is invalid.",
        )));
    }
    Ok(())
}

async fn slug_taken(state: &AppState, slug: &str, except: Option<Uuid>) -> AppResult<bool> {
    let mut finder = Categories::find().filter(CategoryCol::Slug.eq(slug));
    if let Some(id) = except {
        finder = finder.filter(CategoryCol::Id.ne(id));
    }
    Ok(finder.count(&state.orm).await? > 0)
}

async fn ensure_slug_free(state: &AppState, slug: &str, except: Option<Uuid>) -> AppResult<()> {
    if slug_taken(state, slug, except).await? {
        return Err(AppError::Validation(FieldErrors::single(
            "slug",
            "The slug has already been taken.",
        )));
    }
    Ok(())
}

async fn generate_slug(state: &AppState, name: &str) -> AppResult<String> {
    loop {
        let slug = candidate_slug(name, CATEGORY_SUFFIX_LEN);
        if !slug_taken(state, &slug, None).await? {
            return Ok(slug);
        }
    }
}
