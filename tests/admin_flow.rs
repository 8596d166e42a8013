mod common;

use rust_decimal::Decimal;
use serde_json::json;
use storefront_api::{
    dto::{
        cart::{AddToCartRequest, CheckoutRequest},
        categories::CategoryRequest,
        menus::{MenuAlign, MenuItemRequest, MenuOrderEntry, MenuRequest, ReorderMenuRequest},
        orders::{BulkOrderAction, BulkOrderRequest},
        style::{StyleQuery, UpdateStyleRequest},
    },
    error::AppError,
    middleware::session::CartSession,
    routes::params::{OrderQuery, SearchQuery},
    services::{
        cart_service, category_service, menu_service, order_service, storefront_service,
        style_service, user_service,
    },
    style::StyleScope,
};
use uuid::Uuid;

fn menu_item(title: &str, parent_id: Option<Uuid>) -> MenuItemRequest {
    MenuItemRequest {
        title: title.into(),
        url: format!("/{}", title.to_lowercase()),
        parent_id,
        target: None,
        visible: None,
        icon: None,
        align: None,
    }
}

// Back office: categories, menus, orders, users and the card style document.
#[tokio::test]
async fn back_office_flow() -> anyhow::Result<()> {
    let Some(url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&url).await?;
    let admin = common::create_account(&state, "Admin", "admin@example.com", true).await?;
    let shopper = common::create_account(&state, "Shopper", "shopper@example.com", false).await?;

    // Non-admins are turned away
    let forbidden = category_service::list_categories(&state, &shopper, SearchQuery::default()).await;
    assert!(matches!(forbidden, Err(AppError::Forbidden)));

    // Categories: generated slugs, explicit duplicates rejected, parent checks
    let garden = common::create_category(&state, &admin, "Home & Garden").await?;
    assert!(garden.slug.starts_with("home-garden-"));
    let dup = category_service::create_category(
        &state,
        &admin,
        CategoryRequest {
            name: "Other".into(),
            slug: Some(garden.slug.clone()),
            description: None,
            parent_id: None,
        },
    )
    .await;
    assert!(matches!(dup, Err(AppError::Validation(ref e)) if e.contains("slug")));
    let self_parent = category_service::update_category(
        &state,
        &admin,
        garden.id,
        CategoryRequest {
            name: garden.name.clone(),
            slug: Some(garden.slug.clone()),
            description: None,
            parent_id: Some(garden.id),
        },
    )
    .await;
    assert!(matches!(self_parent, Err(AppError::Validation(ref e)) if e.contains("parent_id")));

    // Menus: positions per parent, foreign items 404, reorder, storefront visibility
    let menu = menu_service::create_menu(
        &state,
        &admin,
        MenuRequest { name: "Main".into(), location: "frontend".into(), is_active: None },
    )
    .await?
    .data
    .unwrap();
    let other = menu_service::create_menu(
        &state,
        &admin,
        MenuRequest { name: "Footer".into(), location: "backend".into(), is_active: None },
    )
    .await?
    .data
    .unwrap();

    let shop = menu_service::add_item(&state, &admin, menu.id, menu_item("Shop", None)).await?.data.unwrap();
    let about = menu_service::add_item(&state, &admin, menu.id, menu_item("About", None)).await?.data.unwrap();
    let sale = menu_service::add_item(&state, &admin, menu.id, menu_item("Sale", Some(shop.id))).await?.data.unwrap();
    let secret = menu_service::add_item(
        &state,
        &admin,
        menu.id,
        MenuItemRequest {
            visible: Some(false),
            align: Some(MenuAlign::Right),
            ..menu_item("Secret", None)
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!((shop.position, about.position, sale.position, secret.position), (1, 2, 1, 3));
    assert_eq!(shop.target, "_self");
    assert_eq!(secret.align, "right");

    let foreign = menu_service::delete_item(&state, &admin, other.id, shop.id).await;
    assert!(matches!(foreign, Err(AppError::NotFound)));

    let tree = menu_service::reorder_items(
        &state,
        &admin,
        menu.id,
        ReorderMenuRequest {
            items: vec![
                MenuOrderEntry { id: about.id, position: 0, parent_id: None },
                MenuOrderEntry { id: shop.id, position: 1, parent_id: None },
            ],
        },
    )
    .await?
    .data
    .unwrap();
    let roots: Vec<&str> = tree.items.iter().map(|n| n.item.title.as_str()).collect();
    assert_eq!(roots, ["About", "Shop", "Secret"]);
    assert_eq!(tree.items[1].children.len(), 1);

    let footer_link = menu_service::add_item(&state, &admin, other.id, menu_item("Contact", None)).await?.data.unwrap();
    for parent in [sale.id, footer_link.id] {
        let bad = menu_service::reorder_items(
            &state,
            &admin,
            menu.id,
            ReorderMenuRequest {
                items: vec![
                    MenuOrderEntry { id: about.id, position: 5, parent_id: None },
                    MenuOrderEntry { id: sale.id, position: 0, parent_id: Some(parent) },
                ],
            },
        )
        .await;
        assert!(matches!(bad, Err(AppError::Validation(ref e)) if e.contains("parent_id")));
    }
    let unchanged = menu_service::get_menu(&state, &admin, menu.id).await?.data.unwrap();
    assert_eq!(unchanged.items[0].item.title, "About", "rejected reorder writes nothing");

    let public = storefront_service::menu_for_location(&state, "frontend").await?.data.unwrap();
    let titles: Vec<&str> = public.items.iter().map(|n| n.item.title.as_str()).collect();
    assert_eq!(titles, ["About", "Shop"]);
    assert!(matches!(
        storefront_service::menu_for_location(&state, "sidebar").await,
        Err(AppError::NotFound)
    ));

    // Orders: filters, single transitions and bulk actions
    let lamp = common::create_product(
        &state,
        &admin,
        common::product_request("Lamp", Decimal::new(4500, 2), Some(garden.id)),
    )
    .await?;
    let mut order_ids = Vec::new();
    for n in 0..3 {
        let session = CartSession(format!("order-session-{n}"));
        cart_service::add_to_cart(&state, &session, &lamp.slug, AddToCartRequest::default()).await?;
        let placed = cart_service::checkout_cod(
            &state,
            &session,
            None,
            CheckoutRequest {
                customer_name: Some(format!("Buyer {n}")),
                ..CheckoutRequest::default()
            },
        )
        .await?
        .data
        .unwrap();
        order_ids.push(placed.order.id);
    }

    let found = order_service::list_orders(
        &state,
        &admin,
        OrderQuery { q: Some("buyer 1".into()), ..OrderQuery::default() },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(found.items.len(), 1);

    let cancelled = order_service::transition_order(&state, &admin, order_ids[0], BulkOrderAction::Cancel)
        .await?
        .data
        .unwrap();
    assert_eq!(cancelled.order.status, "cancelled");
    assert_eq!(cancelled.order.payment_status, "pending");

    let unknown = order_service::bulk_orders(
        &state,
        &admin,
        BulkOrderRequest { action: BulkOrderAction::MarkPaid, ids: vec![order_ids[1], Uuid::now_v7()] },
    )
    .await;
    assert!(matches!(unknown, Err(AppError::Validation(ref e)) if e.contains("ids")));

    let result = order_service::bulk_orders(
        &state,
        &admin,
        BulkOrderRequest {
            action: BulkOrderAction::MarkCompleted,
            ids: vec![order_ids[1], order_ids[2], order_ids[1]],
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(result.affected, 2);
    let completed = order_service::get_order(&state, &admin, order_ids[2]).await?.data.unwrap();
    assert_eq!(completed.order.status, "completed");
    assert_eq!(completed.order.payment_status, "paid");

    let filtered = order_service::list_orders(
        &state,
        &admin,
        OrderQuery { status: Some("completed".into()), ..OrderQuery::default() },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(filtered.items.len(), 2);

    order_service::bulk_orders(
        &state,
        &admin,
        BulkOrderRequest { action: BulkOrderAction::Delete, ids: order_ids.clone() },
    )
    .await?;
    assert!(matches!(
        order_service::get_order(&state, &admin, order_ids[0]).await,
        Err(AppError::NotFound)
    ));

    // Users: unique email, no self-demotion or self-deletion
    let created = user_service::create_user(&state, &admin, common::new_user_request("Bea", "bea@example.com"))
        .await?
        .data
        .unwrap();
    let taken = user_service::create_user(&state, &admin, common::new_user_request("Bea 2", "BEA@example.com")).await;
    assert!(matches!(taken, Err(AppError::Validation(ref e)) if e.contains("email")));
    assert!(user_service::set_admin(&state, &admin, created.id, true).await?.data.unwrap().is_admin);
    assert!(matches!(
        user_service::set_admin(&state, &admin, admin.user_id, false).await,
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        user_service::delete_user(&state, &admin, admin.user_id).await,
        Err(AppError::BadRequest(_))
    ));

    // Card style: legacy flat rows are rewritten scoped on first read
    sqlx::query("INSERT INTO home_card_styles (id, style) VALUES ($1, $2)")
        .bind(Uuid::now_v7())
        .bind(json!({ "card": { "shadow": "shadow-sm" }, "image": { "ratio": "4:3" } }))
        .execute(&state.pool)
        .await?;
    let view = style_service::get_style(&state, &shopper, StyleQuery { scope: Some(StyleScope::Section) })
        .await?
        .data
        .unwrap();
    assert_eq!(view.scope, StyleScope::Section);
    assert_eq!(view.style.card.shadow, "shadow-sm");
    let (stored,): (serde_json::Value,) = sqlx::query_as("SELECT style FROM home_card_styles LIMIT 1")
        .fetch_one(&state.pool)
        .await?;
    assert_eq!(stored["home"]["image"]["ratio"], "4:3");
    assert!(stored.get("card").is_none());

    let saved = style_service::update_style(
        &state,
        &admin,
        StyleQuery::default(),
        UpdateStyleRequest {
            style: json!({
                "home": { "viewDetails": { "show": false }, "addToCart": { "show": false } },
                "section": {}
            }),
        },
    )
    .await?
    .data
    .unwrap();
    assert!(saved.style.add_to_cart.show, "shown buttons keep add-to-cart");
    let rejected = style_service::update_style(
        &state,
        &admin,
        StyleQuery::default(),
        UpdateStyleRequest { style: json!("plain") },
    )
    .await;
    assert!(matches!(rejected, Err(AppError::Validation(ref e)) if e.contains("style")));

    let created_categories: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM audit_logs WHERE action = 'category_create' AND user_id = $1",
    )
    .bind(admin.user_id)
    .fetch_one(&state.pool)
    .await?;
    assert!(created_categories >= 1);

    Ok(())
}
