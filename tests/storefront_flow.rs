mod common;

use rust_decimal::Decimal;
use serde_json::json;
use storefront_api::{
    dto::{
        homepage::{ReorderSectionsRequest, SectionCategoryInput, SectionOrderEntry, SectionRequest},
        product_models::{CreateProductModelRequest, UpdateDefinitionRequest},
        products::ProductRequest,
    },
    error::AppError,
    layout::{ModelDefinition, RenderNode},
    routes::params::StoreQuery,
    services::{homepage_service, product_model_service, product_service, storefront_service},
};

// Storefront composition: section product caps, ordering, catalog search and model rendering.
#[tokio::test]
async fn storefront_composition_flow() -> anyhow::Result<()> {
    let Some(url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&url).await?;
    let admin = common::create_account(&state, "Admin", "admin@example.com", true).await?;

    let toys = common::create_category(&state, &admin, "Toys").await?;
    let books = common::create_category(&state, &admin, "Books").await?;
    let mut toy_ids = Vec::new();
    for n in 0..10 {
        let product = common::create_product(
            &state,
            &admin,
            common::product_request(&format!("Toy {n}"), Decimal::new(999, 2), Some(toys.id)),
        )
        .await?;
        toy_ids.push(product.id);
    }
    common::create_product(
        &state,
        &admin,
        ProductRequest {
            is_active: Some(false),
            ..common::product_request("Hidden Toy", Decimal::ONE, Some(toys.id))
        },
    )
    .await?;

    let featured = homepage_service::create_section(
        &state,
        &admin,
        SectionRequest {
            title: "Featured".into(),
            is_active: None,
            position: Some(2),
            categories: vec![
                SectionCategoryInput { id: toys.id, product_limit: None },
                SectionCategoryInput { id: books.id, product_limit: Some(8) },
            ],
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(featured.categories.len(), 2);

    let top = homepage_service::create_section(
        &state,
        &admin,
        SectionRequest {
            title: "Top".into(),
            is_active: None,
            position: Some(1),
            categories: vec![SectionCategoryInput { id: toys.id, product_limit: Some(2) }],
        },
    )
    .await?
    .data
    .unwrap();

    homepage_service::create_section(
        &state,
        &admin,
        SectionRequest {
            title: "Draft".into(),
            is_active: Some(false),
            position: Some(0),
            categories: vec![],
        },
    )
    .await?;

    let blocks = storefront_service::compose_sections(&state.orm).await?;
    let titles: Vec<&str> = blocks.iter().map(|b| b.section.title.as_str()).collect();
    assert_eq!(titles, ["Top", "Featured"]);

    let featured_block = &blocks[1];
    let names: Vec<&str> = featured_block.groups.iter().map(|g| g.category.name.as_str()).collect();
    assert_eq!(names, ["Books", "Toys"]);
    assert!(featured_block.groups[0].products.is_empty(), "empty categories still get a group");

    let newest: Vec<_> = toy_ids.iter().rev().take(4).copied().collect();
    let shown: Vec<_> = featured_block.groups[1].products.iter().map(|p| p.id).collect();
    assert_eq!(shown, newest, "default cap of 4, newest first, inactive excluded");
    assert_eq!(blocks[0].groups[0].products.len(), 2);

    // Reorder swaps the two active sections
    homepage_service::reorder_sections(
        &state,
        &admin,
        ReorderSectionsRequest {
            sections: vec![
                SectionOrderEntry { id: featured.section.id, position: 0 },
                SectionOrderEntry { id: top.section.id, position: 5 },
            ],
        },
    )
    .await?;
    let blocks = storefront_service::compose_sections(&state.orm).await?;
    assert_eq!(blocks[0].section.title, "Featured");

    // Unknown category ids are field errors
    let bad = homepage_service::create_section(
        &state,
        &admin,
        SectionRequest {
            title: "Broken".into(),
            is_active: None,
            position: None,
            categories: vec![SectionCategoryInput { id: uuid::Uuid::now_v7(), product_limit: None }],
        },
    )
    .await;
    assert!(matches!(bad, Err(AppError::Validation(ref e)) if e.contains("categories")));

    // Store home: 12 per page, category filter, search
    let home = storefront_service::home(&state, None, StoreQuery::default()).await?;
    let meta = home.meta.clone().unwrap();
    let page = home.data.unwrap();
    assert_eq!(page.products.len(), 10);
    assert_eq!(meta.total, Some(10));
    assert_eq!(page.categories.len(), 2);
    assert_eq!(page.cart_count, 0);

    let filtered = storefront_service::home(
        &state,
        None,
        StoreQuery { category: Some(books.slug.clone()), ..StoreQuery::default() },
    )
    .await?
    .data
    .unwrap();
    assert!(filtered.products.is_empty());

    let searched = storefront_service::home(
        &state,
        None,
        StoreQuery { q: Some("toy 7".into()), ..StoreQuery::default() },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(searched.products.len(), 1);

    let far = storefront_service::home(
        &state,
        None,
        StoreQuery { page: Some(i64::MAX), ..StoreQuery::default() },
    )
    .await?;
    assert_eq!(far.meta.and_then(|m| m.total), Some(10));
    assert!(far.data.unwrap().products.is_empty());

    // Product page renders the built-in layout until a model is active
    let toy = product_service::get_product(&state, &admin, toy_ids[0]).await?.data.unwrap();
    let page = storefront_service::product_page(&state, &toy.slug).await?.data.unwrap();
    assert!(page.model.is_none());
    assert_eq!(page.layout.secondary.len(), 3);

    let blank = product_model_service::create_product_model(
        &state,
        &admin,
        CreateProductModelRequest {
            name: "   ".into(),
            preview_product_id: None,
            is_active: None,
            definition: None,
        },
    )
    .await;
    assert!(matches!(blank, Err(AppError::Validation(ref e)) if e.contains("name")));

    let model = product_model_service::create_product_model(
        &state,
        &admin,
        CreateProductModelRequest {
            name: "Compact".into(),
            preview_product_id: Some(toy.id),
            is_active: None,
            definition: None,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(model.definition.elements.len(), 4);

    let compact: ModelDefinition = serde_json::from_value(json!({
        "layout": "vertical",
        "elements": [
            { "id": "t", "type": "title", "props": { "tag": "h2" }, "order": 0 },
            { "id": "p", "type": "price", "order": 1 }
        ]
    }))?;
    product_model_service::update_definition(
        &state,
        &admin,
        model.id,
        UpdateDefinitionRequest { definition: compact },
    )
    .await?;

    product_service::update_product(
        &state,
        &admin,
        toy.id,
        ProductRequest {
            slug: Some(toy.slug.clone()),
            sku: Some(toy.sku.clone()),
            product_model_id: Some(model.id),
            ..common::product_request(&toy.name, toy.price, toy.category_id)
        },
    )
    .await?;
    let page = storefront_service::product_page(&state, &toy.slug).await?.data.unwrap();
    assert_eq!(page.model.as_ref().map(|m| m.name.as_str()), Some("Compact"));
    assert!(page.layout.primary.is_empty());
    assert!(matches!(&page.layout.secondary[..], [RenderNode::Title { .. }, RenderNode::Price { .. }]));

    let editor = product_model_service::get_editor(&state, &admin, model.id).await?.data.unwrap();
    assert_eq!(editor.preview_product.map(|p| p.id), Some(toy.id));
    assert_eq!(editor.preview.map(|tree| tree.secondary.len()), Some(2));

    let duplicate: ModelDefinition = serde_json::from_value(json!({
        "elements": [{ "id": "x", "type": "price" }, { "id": "x", "type": "divider" }]
    }))?;
    let rejected = product_model_service::update_definition(
        &state,
        &admin,
        model.id,
        UpdateDefinitionRequest { definition: duplicate },
    )
    .await;
    assert!(matches!(rejected, Err(AppError::Validation(ref e)) if e.contains("definition")));

    let hidden = storefront_service::product_page(&state, "hidden-toy-none").await;
    assert!(matches!(hidden, Err(AppError::NotFound)));

    Ok(())
}
