use indexmap::IndexMap;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use sea_orm::sea_query::{Expr, OnConflict};
use uuid::Uuid;
use validator::Validate;

use crate::{
    audit,
    dto::homepage::{
        DEFAULT_PRODUCT_LIMIT, ReorderSectionsRequest, SectionCategory, SectionDetail, SectionList,
        SectionRequest, SectionWithCategories,
    },
    entity::{
        categories::{Column as CategoryCol, Entity as Categories},
        homepage_section_categories::{
            self, Column as LinkCol, Entity as HomepageSectionCategories,
        },
        homepage_sections::{self, Column as SectionCol, Entity as HomepageSections},
    },
    error::{AppError, AppResult, FieldErrors},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Category, HomepageSection},
    response::{ApiResponse, Meta},
    routes::params::SearchQuery,
    services::style_service,
    state::AppState,
    style::StyleScope,
};

use super::now;

pub async fn list_sections(
    state: &AppState,
    user: &AuthUser,
    query: SearchQuery,
) -> AppResult<ApiResponse<SectionList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination().normalize();
    let finder = HomepageSections::find()
        .order_by_asc(SectionCol::Position)
        .order_by_asc(SectionCol::Id);
    let total = finder.clone().count(&state.orm).await? as i64;
    let sections = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let mut items = Vec::with_capacity(sections.len());
    for section in sections {
        let categories = section_categories(&state.orm, section.id).await?;
        items.push(SectionWithCategories {
            section: HomepageSection::from(section),
            categories,
        });
    }

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Homepage sections", SectionList { items }, Some(meta)))
}

pub async fn get_section(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<SectionDetail>> {
    ensure_admin(user)?;
    let section = find_section(state, id).await?;
    let categories = section_categories(&state.orm, section.id).await?;
    let all_categories = Categories::find()
        .order_by_asc(CategoryCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Category::from)
        .collect();
    let document = style_service::read_document(state).await?;

    Ok(ApiResponse::success(
        "Homepage section",
        SectionDetail {
            section: SectionWithCategories {
                section: HomepageSection::from(section),
                categories,
            },
            all_categories,
            style: document.scope(StyleScope::Section).clone(),
        },
        None,
    ))
}

pub async fn create_section(
    state: &AppState,
    user: &AuthUser,
    payload: SectionRequest,
) -> AppResult<ApiResponse<SectionWithCategories>> {
    ensure_admin(user)?;
    let payload = payload.normalize();
    payload.validate()?;
    let links = collect_links(state, &payload).await?;

    let txn = state.orm.begin().await?;
    let section = homepage_sections::ActiveModel {
        id: Set(Uuid::now_v7()),
        title: Set(payload.title.trim().to_string()),
        is_active: Set(payload.is_active.unwrap_or(true)),
        position: Set(payload.position.unwrap_or(0)),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await?;
    sync_categories(&txn, section.id, &links).await?;
    txn.commit().await?;

    audit::record(
        &state.orm,
        user,
        "homepage_section_create",
        "homepage_sections",
        serde_json::json!({ "section_id": section.id }),
    )
    .await;

    let categories = section_categories(&state.orm, section.id).await?;
    Ok(ApiResponse::success(
        "Section created",
        SectionWithCategories {
            section: HomepageSection::from(section),
            categories,
        },
        Some(Meta::empty()),
    ))
}

pub async fn update_section(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: SectionRequest,
) -> AppResult<ApiResponse<SectionWithCategories>> {
    ensure_admin(user)?;
    let payload = payload.normalize();
    payload.validate()?;
    let existing = find_section(state, id).await?;
    let links = collect_links(state, &payload).await?;

    let txn = state.orm.begin().await?;
    let mut active: homepage_sections::ActiveModel = existing.into();
    active.title = Set(payload.title.trim().to_string());
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    if let Some(position) = payload.position {
        active.position = Set(position);
    }
    active.updated_at = Set(now());
    let section = active.update(&txn).await?;
    sync_categories(&txn, section.id, &links).await?;
    txn.commit().await?;

    audit::record(
        &state.orm,
        user,
        "homepage_section_update",
        "homepage_sections",
        serde_json::json!({ "section_id": section.id }),
    )
    .await;

    let categories = section_categories(&state.orm, section.id).await?;
    Ok(ApiResponse::success(
        "Section updated",
        SectionWithCategories {
            section: HomepageSection::from(section),
            categories,
        },
        Some(Meta::empty()),
    ))
}

pub async fn delete_section(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let result = HomepageSections::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.orm,
        user,
        "homepage_section_delete",
        "homepage_sections",
        serde_json::json!({ "section_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Section deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// Writes every listed position in one transaction. All ids must exist.
pub async fn reorder_sections(
    state: &AppState,
    user: &AuthUser,
    payload: ReorderSectionsRequest,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    payload.validate()?;

    let mut ids: Vec<Uuid> = payload.sections.iter().map(|s| s.id).collect();
    ids.sort();
    ids.dedup();
    let found = HomepageSections::find()
        .filter(SectionCol::Id.is_in(ids.clone()))
        .count(&state.orm)
        .await? as usize;
    if found != ids.len() {
        return Err(AppError::Validation(FieldErrors::single(
            "sections",
            "One or more selected sections do not exist.",
        )));
    }

    let txn = state.orm.begin().await?;
    for entry in &payload.sections {
        HomepageSections::update_many()
            .col_expr(SectionCol::Position, Expr::value(entry.position))
            .col_expr(SectionCol::UpdatedAt, Expr::value(now()))
            .filter(SectionCol::Id.eq(entry.id))
            .exec(&txn)
            .await?;
    }
    txn.commit().await?;

    audit::record(
        &state.orm,
        user,
        "homepage_section_reorder",
        "homepage_sections",
        serde_json::json!({ "count": payload.sections.len() }),
    )
    .await;

    Ok(ApiResponse::success(
        "Order updated",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// Categories linked to a section, by name, with their product caps.
pub async fn section_categories<C>(db: &C, section_id: Uuid) -> AppResult<Vec<SectionCategory>>
where
    C: ConnectionTrait,
{
    let rows = HomepageSectionCategories::find()
        .filter(LinkCol::SectionId.eq(section_id))
        .find_also_related(Categories)
        .order_by_asc(CategoryCol::Name)
        .order_by_asc(CategoryCol::Id)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(link, category)| {
            category.map(|category| SectionCategory {
                category: Category::from(category),
                product_limit: if link.product_limit > 0 {
                    link.product_limit
                } else {
                    DEFAULT_PRODUCT_LIMIT
                },
            })
        })
        .collect())
}

async fn find_section(state: &AppState, id: Uuid) -> AppResult<homepage_sections::Model> {
    match HomepageSections::find_by_id(id).one(&state.orm).await? {
        Some(s) => Ok(s),
        None => Err(AppError::NotFound),
    }
}

/// Category id to product limit, last duplicate wins. Every category must exist.
async fn collect_links(state: &AppState, payload: &SectionRequest) -> AppResult<IndexMap<Uuid, i32>> {
    let links: IndexMap<Uuid, i32> = payload
        .categories
        .iter()
        .map(|c| (c.id, c.product_limit.unwrap_or(DEFAULT_PRODUCT_LIMIT)))
        .collect();
    if links.is_empty() {
        return Ok(links);
    }

    let found = Categories::find()
        .filter(CategoryCol::Id.is_in(links.keys().copied()))
        .count(&state.orm)
        .await? as usize;
    if found != links.len() {
        return Err(AppError::Validation(FieldErrors::single(
            "categories",
            "One or more selected categories do not exist.",
        )));
    }
    Ok(links)
}

/// Makes the section's links exactly `links`: stale rows removed, kept rows get the new limit.
async fn sync_categories<C>(db: &C, section_id: Uuid, links: &IndexMap<Uuid, i32>) -> AppResult<()>
where
    C: ConnectionTrait,
{
    let mut stale = HomepageSectionCategories::delete_many().filter(LinkCol::SectionId.eq(section_id));
    if !links.is_empty() {
        stale = stale.filter(LinkCol::CategoryId.is_not_in(links.keys().copied()));
    }
    stale.exec(db).await?;

    if links.is_empty() {
        return Ok(());
    }

    let rows = links.iter().map(|(category_id, limit)| homepage_section_categories::ActiveModel {
        id: Set(Uuid::now_v7()),
        section_id: Set(section_id),
        category_id: Set(*category_id),
        product_limit: Set(*limit),
        created_at: NotSet,
    });
    HomepageSectionCategories::insert_many(rows)
        .on_conflict(
            OnConflict::columns([LinkCol::SectionId, LinkCol::CategoryId])
                .update_column(LinkCol::ProductLimit)
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    Ok(())
}
