use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, EntityTrait, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use uuid::Uuid;
use validator::Validate;

use crate::{
    audit,
    dto::products::{ProductList, ProductRequest},
    entity::{
        categories::{Column as CategoryCol, Entity as Categories},
        product_models::Entity as ProductModels,
        products::{self, Column as ProductCol, Entity as Products},
    },
    error::{AppError, AppResult, FieldErrors},
    middleware::auth::{AuthUser, ensure_admin},
    models::Product,
    response::{ApiResponse, Meta},
    routes::params::SearchQuery,
    slug::{PRODUCT_SUFFIX_LEN, candidate_sku, candidate_slug},
    state::AppState,
};

use super::now;

/// Admin listing. `q` matches text columns and the category name, an exact id when it parses as a
/// UUID, and exact price or stock when it parses as a number.
pub async fn list_products(
    state: &AppState,
    user: &AuthUser,
    query: SearchQuery,
) -> AppResult<ApiResponse<ProductList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();

    if let Some(term) = query.term() {
        let pattern = format!("%{}%", term);
        let mut any = Condition::any()
            .add(Expr::col((Products, ProductCol::Name)).ilike(pattern.clone()))
            .add(Expr::col((Products, ProductCol::Slug)).ilike(pattern.clone()))
            .add(Expr::col((Products, ProductCol::Sku)).ilike(pattern.clone()))
            .add(Expr::col((Products, ProductCol::Description)).ilike(pattern.clone()))
            .add(Expr::col((Categories, CategoryCol::Name)).ilike(pattern));
        if let Ok(id) = Uuid::parse_str(term) {
            any = any.add(ProductCol::Id.eq(id));
        }
        if let Ok(price) = term.parse::<Decimal>() {
            any = any.add(ProductCol::Price.eq(price));
        }
        if let Ok(stock) = term.parse::<i32>() {
            any = any.add(ProductCol::Stock.eq(stock));
        }
        condition = condition.add(any);
    }

    let finder = Products::find()
        .join(JoinType::LeftJoin, products::Relation::Categories.def())
        .filter(condition)
        .order_by_desc(ProductCol::Id);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn get_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    let product = match Products::find_by_id(id).one(&state.orm).await? {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Product", Product::from(product), None))
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    payload: ProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    let payload = payload.normalize();
    payload.validate()?;
    check_references(state, &payload).await?;

    let slug = resolve_slug(state, payload.slug.as_deref(), &payload.name, None).await?;
    let sku = resolve_sku(state, payload.sku.as_deref(), None).await?;

    let product = products::ActiveModel {
        id: Set(Uuid::now_v7()),
        category_id: Set(payload.category_id),
        product_model_id: Set(payload.product_model_id),
        name: Set(payload.name),
        slug: Set(slug),
        sku: Set(sku),
        description: Set(payload.description),
        price: Set(payload.price),
        stock: Set(payload.stock),
        image_url: Set(payload.image_url),
        is_active: Set(payload.is_active.unwrap_or(true)),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.orm,
        user,
        "product_create",
        "products",
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Product created",
        Product::from(product),
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: ProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    let payload = payload.normalize();
    payload.validate()?;

    let existing = match Products::find_by_id(id).one(&state.orm).await? {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };
    check_references(state, &payload).await?;

    let slug = resolve_slug(state, payload.slug.as_deref(), &payload.name, Some(id)).await?;
    let sku = resolve_sku(state, payload.sku.as_deref(), Some(id)).await?;

    let mut active: products::ActiveModel = existing.into();
    active.category_id = Set(payload.category_id);
    active.product_model_id = Set(payload.product_model_id);
    active.name = Set(payload.name);
    active.slug = Set(slug);
    active.sku = Set(sku);
    active.description = Set(payload.description);
    active.price = Set(payload.price);
    active.stock = Set(payload.stock);
    active.image_url = Set(payload.image_url);
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    active.updated_at = Set(now());
    let product = active.update(&state.orm).await?;

    audit::record(
        &state.orm,
        user,
        "product_update",
        "products",
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        Product::from(product),
        Some(Meta::empty()),
    ))
}

pub async fn delete_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let result = Products::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.orm,
        user,
        "product_delete",
        "products",
        serde_json::json!({ "product_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

async fn check_references(state: &AppState, payload: &ProductRequest) -> AppResult<()> {
    let mut errors = FieldErrors::new();
    if let Some(category_id) = payload.category_id {
        if Categories::find_by_id(category_id).one(&state.orm).await?.is_none() {
            errors.add("category_id", "The selected category is invalid.");
        }
    }
    if let Some(model_id) = payload.product_model_id {
        if ProductModels::find_by_id(model_id).one(&state.orm).await?.is_none() {
            errors.add("product_model_id", "The selected product model is invalid.");
        }
    }
    errors.into_result()
}

async fn taken(
    state: &AppState,
    column: ProductCol,
    value: &str,
    except: Option<Uuid>,
) -> AppResult<bool> {
    let mut finder = Products::find().filter(column.eq(value));
    if let Some(id) = except {
        finder = finder.filter(ProductCol::Id.ne(id));
    }
    Ok(finder.count(&state.orm).await? > 0)
}

/// A supplied slug must be free; a missing one is generated until free.
async fn resolve_slug(
    state: &AppState,
    requested: Option<&str>,
    name: &str,
    except: Option<Uuid>,
) -> AppResult<String> {
    if let Some(slug) = requested {
        if taken(state, ProductCol::Slug, slug, except).await? {
            return Err(AppError::Validation(FieldErrors::single(
                "slug",
                "The slug has already been taken.",
            )));
        }
        return Ok(slug.to_string());
    }
    loop {
        let slug = candidate_slug(name, PRODUCT_SUFFIX_LEN);
        if !taken(state, ProductCol::Slug, &slug, None).await? {
            return Ok(slug);
        }
    }
}

async fn resolve_sku(
    state: &AppState,
    requested: Option<&str>,
    except: Option<Uuid>,
) -> AppResult<String> {
    if let Some(sku) = requested {
        if taken(state, ProductCol::Sku, sku, except).await? {
            return Err(AppError::Validation(FieldErrors::single(
                "sku",
                "The sku has already been taken.",
            )));
        }
        return Ok(sku.to_string());
    }
    loop {
        let sku = candidate_sku();
        if !taken(state, ProductCol::Sku, &sku, None).await? {
            return Ok(sku);
        }
    }
}
