use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;

use crate::{
    dto::{
        homepage::{SectionBlock, SectionGroup},
        menus::MenuTree,
        store::{HomePage, ModelSummary, ProductPage},
    },
    entity::{
        categories::{Column as CategoryCol, Entity as Categories},
        homepage_sections::{Column as SectionCol, Entity as HomepageSections},
        menus::{Column as MenuCol, Entity as Menus},
        product_models::Entity as ProductModels,
        products::{self, Column as ProductCol, Entity as Products},
    },
    error::{AppError, AppResult},
    layout::{RenderSubject, render_for_product},
    middleware::session::CartSession,
    models::{Category, HomepageSection, Product, ProductModel},
    response::{ApiResponse, Meta},
    routes::params::{StoreQuery, filter_value},
    services::{cart_service, homepage_service::section_categories, menu_service, style_service},
    state::AppState,
};

/// Storefront landing data: a page of active products, the category list, the composed sections,
/// the card style and the session cart count.
pub async fn home(
    state: &AppState,
    session: Option<&CartSession>,
    query: StoreQuery,
) -> AppResult<ApiResponse<HomePage>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all().add(ProductCol::IsActive.eq(true));

    if let Some(term) = filter_value(&query.q) {
        let pattern = format!("%{}%", term);
        condition = condition.add(
            Condition::any()
                .add(Expr::col((Products, ProductCol::Name)).ilike(pattern.clone()))
                .add(Expr::col((Products, ProductCol::Description)).ilike(pattern.clone()))
                .add(Expr::col((Products, ProductCol::Sku)).ilike(pattern)),
        );
    }
    if let Some(slug) = filter_value(&query.category) {
        condition = condition.add(Expr::col((Categories, CategoryCol::Slug)).eq(slug));
    }

    let finder = Products::find()
        .join(JoinType::LeftJoin, products::Relation::Categories.def())
        .filter(condition)
        .order_by_desc(ProductCol::Id);
    let total = finder.clone().count(&state.orm).await? as i64;
    let products = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    let categories = Categories::find()
        .order_by_asc(CategoryCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Category::from)
        .collect();

    let sections = compose_sections(&state.orm).await?;
    let style = style_service::read_document(state).await?;
    let cart_count = match session {
        Some(session) => cart_service::load_cart(&state.orm, session.id())
            .await?
            .item_count(),
        None => 0,
    };

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Store",
        HomePage {
            products,
            categories,
            sections,
            style,
            cart_count,
        },
        Some(meta),
    ))
}

/// Active sections by `(position, id)`. Each linked category, by name, yields a group with up to
/// `product_limit` of its newest active products; categories with no products still yield a group.
pub async fn compose_sections<C>(db: &C) -> AppResult<Vec<SectionBlock>>
where
    C: ConnectionTrait,
{
    let sections = HomepageSections::find()
        .filter(SectionCol::IsActive.eq(true))
        .order_by_asc(SectionCol::Position)
        .order_by_asc(SectionCol::Id)
        .all(db)
        .await?;

    let mut blocks = Vec::with_capacity(sections.len());
    for section in sections {
        let links = section_categories(db, section.id).await?;
        let mut groups = Vec::with_capacity(links.len());
        for link in links {
            let products = Products::find()
                .filter(ProductCol::IsActive.eq(true))
                .filter(ProductCol::CategoryId.eq(link.category.id))
                .order_by_desc(ProductCol::Id)
                .limit(link.product_limit as u64)
                .all(db)
                .await?
                .into_iter()
                .map(Product::from)
                .collect();
            groups.push(SectionGroup {
                category: link.category,
                products,
            });
        }
        blocks.push(SectionBlock {
            section: HomepageSection::from(section),
            groups,
        });
    }
    Ok(blocks)
}

/// Active product by slug with its category, model summary and rendered layout.
pub async fn product_page(state: &AppState, slug: &str) -> AppResult<ApiResponse<ProductPage>> {
    let product = Products::find()
        .filter(ProductCol::Slug.eq(slug))
        .filter(ProductCol::IsActive.eq(true))
        .one(&state.orm)
        .await?;
    let product = match product {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    let category = match product.category_id {
        Some(id) => Categories::find_by_id(id).one(&state.orm).await?,
        None => None,
    };
    let model = match product.product_model_id {
        Some(id) => match ProductModels::find_by_id(id).one(&state.orm).await? {
            Some(m) => Some(ProductModel::try_from(m)?),
            None => None,
        },
        None => None,
    };

    let layout = render_for_product(
        &RenderSubject::from(&product),
        model.as_ref().and_then(ProductModel::active_definition),
    );

    Ok(ApiResponse::success(
        "Product",
        ProductPage {
            product: Product::from(product),
            category: category.map(Category::from),
            model: model.map(|m| ModelSummary {
                id: m.id,
                name: m.name,
                is_active: m.is_active,
            }),
            layout,
        },
        None,
    ))
}

/// The first active menu at `location`, visible items only.
pub async fn menu_for_location(
    state: &AppState,
    location: &str,
) -> AppResult<ApiResponse<MenuTree>> {
    let menu = Menus::find()
        .filter(MenuCol::Location.eq(location))
        .filter(MenuCol::IsActive.eq(true))
        .order_by_asc(MenuCol::Id)
        .one(&state.orm)
        .await?;
    let menu = match menu {
        Some(m) => m,
        None => return Err(AppError::NotFound),
    };
    let tree = menu_service::load_tree(state, menu, true).await?;
    Ok(ApiResponse::success("Menu", tree, None))
}
