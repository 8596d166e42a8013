mod common;

use rust_decimal::Decimal;
use storefront_api::{
    dto::{
        cart::{AddToCartRequest, CartLineInput, CheckoutRequest, UpdateCartRequest},
        products::ProductRequest,
    },
    error::AppError,
    middleware::session::CartSession,
    services::{cart_service, order_service, product_service},
};

// Storefront flow: cart edits, guest and account COD checkout, order snapshots and empty carts.
#[tokio::test]
async fn cod_checkout_flow() -> anyhow::Result<()> {
    let Some(url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&url).await?;

    let admin = common::create_account(&state, "Admin", "admin@example.com", true).await?;
    let customer = common::create_account(&state, "Ada Buyer", "ada@example.com", false).await?;
    let electronics = common::create_category(&state, &admin, "Electronics").await?;
    let phone = common::create_product(
        &state,
        &admin,
        common::product_request("Phone", Decimal::new(19999, 2), Some(electronics.id)),
    )
    .await?;
    let case = common::create_product(
        &state,
        &admin,
        common::product_request("Phone Case", Decimal::new(1250, 2), Some(electronics.id)),
    )
    .await?;

    let guest = CartSession("guest-session".into());

    // Empty cart
    match cart_service::checkout_cod(&state, &guest, None, CheckoutRequest::default()).await {
        Err(AppError::EmptyCart(msg)) => assert_eq!(msg, "Your cart is empty"),
        other => panic!("expected EmptyCart, got {:?}", other.map(|r| r.message)),
    }

    // Additive add, then absolute update
    cart_service::add_to_cart(&state, &guest, &phone.slug, AddToCartRequest { qty: Some(1) }).await?;
    let view = cart_service::add_to_cart(&state, &guest, &phone.slug, AddToCartRequest::default())
        .await?
        .data
        .unwrap();
    assert_eq!(view.item_count, 2);
    assert_eq!(view.subtotal, Decimal::new(39998, 2));

    cart_service::add_to_cart(&state, &guest, &case.slug, AddToCartRequest { qty: Some(3) }).await?;
    let view = cart_service::update_cart(
        &state,
        &guest,
        UpdateCartRequest {
            lines: vec![
                CartLineInput { product_id: phone.id, qty: 2 },
                CartLineInput { product_id: case.id, qty: 0 },
            ],
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].line_total, Decimal::new(39998, 2));

    let missing = cart_service::add_to_cart(&state, &guest, "no-such-product", AddToCartRequest::default()).await;
    assert!(matches!(missing, Err(AppError::NotFound)));

    // Guest checkout
    let placed = cart_service::checkout_cod(&state, &guest, None, CheckoutRequest::default())
        .await?
        .data
        .unwrap();
    assert_eq!(placed.order.total, Decimal::new(39998, 2));
    assert_eq!(placed.order.subtotal, placed.order.total);
    assert_eq!(placed.order.tax, Decimal::ZERO);
    assert_eq!(placed.order.status, "placed");
    assert_eq!(placed.order.payment_method, "COD");
    assert_eq!(placed.order.payment_status, "pending");
    assert_eq!(placed.order.customer_name, "Guest");
    assert!(placed.order.placed_at.is_some());
    assert_eq!(placed.items.len(), 1);
    assert_eq!(placed.items[0].quantity, 2);
    assert_eq!(placed.items[0].unit_price, Decimal::new(19999, 2));

    assert!(cart_service::load_cart(&state.orm, guest.id()).await?.is_empty());

    // Snapshot survives catalog edits
    product_service::update_product(
        &state,
        &admin,
        phone.id,
        ProductRequest {
            slug: Some(phone.slug.clone()),
            sku: Some(phone.sku.clone()),
            ..common::product_request("Phone Pro", Decimal::new(25000, 2), Some(electronics.id))
        },
    )
    .await?;
    let detail = order_service::get_order(&state, &admin, placed.order.id)
        .await?
        .data
        .unwrap();
    assert_eq!(detail.items[0].product_name, "Phone");
    assert_eq!(detail.items[0].unit_price, Decimal::new(19999, 2));
    assert_eq!(detail.order.total, Decimal::new(39998, 2));

    // Account checkout uses live prices and the account's name
    let shopper = CartSession("account-session".into());
    cart_service::add_to_cart(&state, &shopper, &phone.slug, AddToCartRequest::default()).await?;
    let placed = cart_service::checkout_cod(
        &state,
        &shopper,
        Some(&customer),
        CheckoutRequest {
            ship_city: Some("Lisbon".into()),
            ..CheckoutRequest::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(placed.order.customer_name, "Ada Buyer");
    assert_eq!(placed.order.customer_email.as_deref(), Some("ada@example.com"));
    assert_eq!(placed.order.user_id, Some(customer.user_id));
    assert_eq!(placed.order.ship_city, "Lisbon");
    assert_eq!(placed.order.total, Decimal::new(25000, 2));

    // A cart whose products are gone is left as it was
    let stale = CartSession("stale-session".into());
    cart_service::add_to_cart(&state, &stale, &case.slug, AddToCartRequest::default()).await?;
    product_service::delete_product(&state, &admin, case.id).await?;
    match cart_service::checkout_cod(&state, &stale, None, CheckoutRequest::default()).await {
        Err(AppError::EmptyCart(msg)) => assert_eq!(msg, "No products found in cart"),
        other => panic!("expected EmptyCart, got {:?}", other.map(|r| r.message)),
    }
    let kept = cart_service::load_cart(&state.orm, stale.id()).await?;
    assert_eq!(kept.quantity(case.id), Some(1));

    let view = cart_service::view_cart(&state, &stale).await?.data.unwrap();
    assert!(view.items.is_empty(), "deleted products are skipped in the view");

    Ok(())
}
