mod common;

use rust_decimal::Decimal;
use storefront_api::{
    dto::{
        cart::AddToCartRequest,
        homepage::{SectionCategoryInput, SectionRequest},
        products::ProductRequest,
    },
    middleware::session::CartSession,
    routes::params::SearchQuery,
    services::{cart_service, homepage_service, product_service},
    style::CardStyle,
};
use uuid::Uuid;

fn search(q: &str) -> SearchQuery {
    SearchQuery {
        q: Some(q.into()),
        ..SearchQuery::default()
    }
}

fn named(name: &str, slug: &str, sku: &str, price: Decimal, stock: i32, category_id: Option<Uuid>) -> ProductRequest {
    ProductRequest {
        slug: Some(slug.into()),
        sku: Some(sku.into()),
        stock,
        ..common::product_request(name, price, category_id)
    }
}

#[tokio::test]
async fn catalog_search_cart_edits_and_sections() -> anyhow::Result<()> {
    let Some(url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&url).await?;
    let admin = common::create_account(&state, "Admin", "admin@example.com", true).await?;

    let furniture = common::create_category(&state, &admin, "Furniture").await?;
    let lighting = common::create_category(&state, &admin, "Lighting").await?;
    let lamp = common::create_product(
        &state,
        &admin,
        named("Alpha Lamp", "alpha-lamp", "SKU-ALPHA", Decimal::new(1250, 2), 3, Some(lighting.id)),
    )
    .await?;
    let chair = common::create_product(
        &state,
        &admin,
        named("Beta Chair", "beta-chair", "SKU-BETA", Decimal::new(4000, 2), 7, Some(furniture.id)),
    )
    .await?;

    // Admin product search
    let by_category = product_service::list_products(&state, &admin, search("furni"))
        .await?
        .data
        .unwrap();
    assert_eq!(by_category.items.len(), 1);
    assert_eq!(by_category.items[0].id, chair.id);

    let by_id = product_service::list_products(&state, &admin, search(&lamp.id.to_string()))
        .await?
        .data
        .unwrap();
    assert_eq!(by_id.items.len(), 1);
    assert_eq!(by_id.items[0].id, lamp.id);

    let by_price = product_service::list_products(&state, &admin, search("12.50"))
        .await?
        .data
        .unwrap();
    assert_eq!(by_price.items.len(), 1);
    assert_eq!(by_price.items[0].id, lamp.id);

    let by_stock = product_service::list_products(&state, &admin, search("7"))
        .await?
        .data
        .unwrap();
    assert_eq!(by_stock.items.len(), 1);
    assert_eq!(by_stock.items[0].id, chair.id);

    let everything = product_service::list_products(&state, &admin, SearchQuery::default()).await?;
    assert_eq!(everything.meta.and_then(|m| m.total), Some(2));
    assert_eq!(everything.data.unwrap().items[0].id, chair.id, "newest first");

    // Remove and clear
    let session = CartSession("catalog-session".into());
    cart_service::add_to_cart(&state, &session, &lamp.slug, AddToCartRequest { qty: Some(2) }).await?;
    cart_service::add_to_cart(&state, &session, &chair.slug, AddToCartRequest::default()).await?;

    let view = cart_service::remove_from_cart(&state, &session, &lamp.slug)
        .await?
        .data
        .unwrap();
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].product.id, chair.id);
    assert_eq!(view.subtotal, Decimal::new(4000, 2));

    let again = cart_service::remove_from_cart(&state, &session, &lamp.slug)
        .await?
        .data
        .unwrap();
    assert_eq!(again.item_count, 1);

    let cleared = cart_service::clear_cart(&state, &session).await?.data.unwrap();
    assert!(cleared.items.is_empty());
    assert!(cart_service::load_cart(&state.orm, session.id()).await?.is_empty());

    // Section category sync
    let section = homepage_service::create_section(
        &state,
        &admin,
        SectionRequest {
            title: "Living".into(),
            is_active: None,
            position: Some(2),
            categories: vec![
                SectionCategoryInput {
                    id: furniture.id,
                    product_limit: None,
                },
                SectionCategoryInput {
                    id: lighting.id,
                    product_limit: Some(6),
                },
            ],
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(section.categories.len(), 2);
    assert_eq!(section.categories[0].product_limit, 4);

    let updated = homepage_service::update_section(
        &state,
        &admin,
        section.section.id,
        SectionRequest {
            title: "Living room".into(),
            is_active: Some(false),
            position: None,
            categories: vec![SectionCategoryInput {
                id: lighting.id,
                product_limit: Some(9),
            }],
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(updated.section.title, "Living room");
    assert!(!updated.section.is_active);
    assert_eq!(updated.section.position, 2);
    assert_eq!(updated.categories.len(), 1);
    assert_eq!(updated.categories[0].category.id, lighting.id);
    assert_eq!(updated.categories[0].product_limit, 9);

    let detail = homepage_service::get_section(&state, &admin, section.section.id)
        .await?
        .data
        .unwrap();
    assert_eq!(detail.all_categories.len(), 2);
    assert_eq!(detail.section.categories.len(), 1);
    assert_eq!(detail.style, CardStyle::default());

    Ok(())
}
