use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect,
    Set,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    audit,
    dto::product_models::{
        CreateProductModelRequest, ProductModelEditor, ProductModelList, ProductRef,
        UpdateDefinitionRequest, UpdateProductModelRequest,
    },
    entity::{
        product_models::{self, Column as ModelCol, Entity as ProductModels},
        products::{Column as ProductCol, Entity as Products},
    },
    error::{AppError, AppResult, FieldErrors},
    layout::{ModelDefinition, RenderSubject, render},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Product, ProductModel},
    response::{ApiResponse, Meta},
    routes::params::SearchQuery,
    state::AppState,
};

use super::now;

const PICKER_LIMIT: u64 = 200;

pub async fn list_product_models(
    state: &AppState,
    user: &AuthUser,
    query: SearchQuery,
) -> AppResult<ApiResponse<ProductModelList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination().normalize();

    let finder = ProductModels::find()
        .order_by_asc(ModelCol::Name)
        .order_by_asc(ModelCol::Id);
    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(ProductModel::try_from)
        .collect::<AppResult<Vec<_>>>()?;

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Product models",
        ProductModelList { items },
        Some(meta),
    ))
}

/// The model with its preview product (or the oldest product) rendered through the model's own
/// definition, whether or not the model is active.
pub async fn get_editor(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<ProductModelEditor>> {
    ensure_admin(user)?;
    let model = find_model(state, id).await?;

    let preview_product = match model.preview_product_id {
        Some(product_id) => Products::find_by_id(product_id).one(&state.orm).await?,
        None => None,
    };
    let preview_product = match preview_product {
        Some(p) => Some(p),
        None => {
            Products::find()
                .order_by_asc(ProductCol::Id)
                .one(&state.orm)
                .await?
        }
    };

    let preview = preview_product
        .as_ref()
        .map(|p| render(&model.definition, &RenderSubject::from(p)));

    let products = Products::find()
        .order_by_asc(ProductCol::Name)
        .limit(PICKER_LIMIT)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|p| ProductRef {
            id: p.id,
            name: p.name,
            slug: p.slug,
        })
        .collect();

    Ok(ApiResponse::success(
        "Product model",
        ProductModelEditor {
            model,
            preview_product: preview_product.map(Product::from),
            preview,
            products,
        },
        None,
    ))
}

pub async fn create_product_model(
    state: &AppState,
    user: &AuthUser,
    payload: CreateProductModelRequest,
) -> AppResult<ApiResponse<ProductModel>> {
    ensure_admin(user)?;
    let payload = payload.normalize();
    payload.validate()?;
    check_preview_product(state, payload.preview_product_id).await?;
    let definition = payload.definition.unwrap_or_else(ModelDefinition::starter);
    definition.validate()?;

    let model = product_models::ActiveModel {
        id: Set(Uuid::now_v7()),
        name: Set(payload.name.trim().to_string()),
        is_active: Set(payload.is_active.unwrap_or(true)),
        preview_product_id: Set(payload.preview_product_id),
        definition: Set(definition_json(&definition)?),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.orm,
        user,
        "product_model_create",
        "product_models",
        serde_json::json!({ "product_model_id": model.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Product model created",
        ProductModel::try_from(model)?,
        Some(Meta::empty()),
    ))
}

pub async fn update_product_model(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateProductModelRequest,
) -> AppResult<ApiResponse<ProductModel>> {
    ensure_admin(user)?;
    let payload = payload.normalize();
    payload.validate()?;
    let existing = match ProductModels::find_by_id(id).one(&state.orm).await? {
        Some(m) => m,
        None => return Err(AppError::NotFound),
    };
    check_preview_product(state, payload.preview_product_id).await?;

    let mut active: product_models::ActiveModel = existing.into();
    active.name = Set(payload.name.trim().to_string());
    active.preview_product_id = Set(payload.preview_product_id);
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    if let Some(definition) = payload.definition {
        definition.validate()?;
        active.definition = Set(definition_json(&definition)?);
    }
    active.updated_at = Set(now());
    let model = active.update(&state.orm).await?;

    audit::record(
        &state.orm,
        user,
        "product_model_update",
        "product_models",
        serde_json::json!({ "product_model_id": model.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        ProductModel::try_from(model)?,
        Some(Meta::empty()),
    ))
}

/// Replaces the whole element list.
pub async fn update_definition(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateDefinitionRequest,
) -> AppResult<ApiResponse<ProductModel>> {
    ensure_admin(user)?;
    let existing = match ProductModels::find_by_id(id).one(&state.orm).await? {
        Some(m) => m,
        None => return Err(AppError::NotFound),
    };
    payload.definition.validate()?;

    let mut active: product_models::ActiveModel = existing.into();
    active.definition = Set(definition_json(&payload.definition)?);
    active.updated_at = Set(now());
    let model = active.update(&state.orm).await?;

    audit::record(
        &state.orm,
        user,
        "product_model_definition",
        "product_models",
        serde_json::json!({
            "product_model_id": model.id,
            "elements": payload.definition.elements.len(),
        }),
    )
    .await;

    Ok(ApiResponse::success(
        "Definition saved",
        ProductModel::try_from(model)?,
        Some(Meta::empty()),
    ))
}

pub async fn delete_product_model(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let result = ProductModels::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.orm,
        user,
        "product_model_delete",
        "product_models",
        serde_json::json!({ "product_model_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn find_model(state: &AppState, id: Uuid) -> AppResult<ProductModel> {
    match ProductModels::find_by_id(id).one(&state.orm).await? {
        Some(m) => ProductModel::try_from(m),
        None => Err(AppError::NotFound),
    }
}

async fn check_preview_product(state: &AppState, product_id: Option<Uuid>) -> AppResult<()> {
    let Some(product_id) = product_id else {
        return Ok(());
    };
    if Products::find_by_id(product_id).one(&state.orm).await?.is_none() {
        return Err(AppError::Validation(FieldErrors::single(
            "preview_product_id",
            "The selected preview product is invalid.",
        )));
    }
    Ok(())
}

fn definition_json(definition: &ModelDefinition) -> AppResult<serde_json::Value> {
    serde_json::to_value(definition)
        .map_err(|err| AppError::Internal(anyhow::anyhow!("definition encode failed: {err}")))
}
