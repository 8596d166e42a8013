use storefront_api::cart::Cart;
use uuid::Uuid;

#[test]
fn add_is_additive_and_keeps_first_seen_order() {
    let (a, b) = (Uuid::now_v7(), Uuid::now_v7());
    let mut cart = Cart::new();
    cart.add(a, 1);
    cart.add(b, 2);
    cart.add(a, 3);

    assert_eq!(cart.quantity(a), Some(4));
    assert_eq!(cart.product_ids(), vec![a, b]);
    assert_eq!(cart.item_count(), 6);
}

#[test]
fn add_ignores_non_positive_quantities() {
    let id = Uuid::now_v7();
    let mut cart = Cart::new();
    cart.add(id, 0);
    cart.add(id, -2);
    assert!(cart.is_empty());
}

#[test]
fn set_lines_is_absolute_and_drops_zero() {
    let (a, b, c) = (Uuid::now_v7(), Uuid::now_v7(), Uuid::now_v7());
    let mut cart = Cart::new();
    cart.add(a, 5);
    cart.add(b, 1);

    cart.set_lines([(a, 2), (b, 0), (c, 7)]);

    assert_eq!(cart.quantity(a), Some(2));
    assert_eq!(cart.quantity(b), None);
    assert_eq!(cart.quantity(c), Some(7));
    assert_eq!(cart.len(), 2);
}

#[test]
fn remove_is_idempotent() {
    let (a, b) = (Uuid::now_v7(), Uuid::now_v7());
    let mut cart = Cart::new();
    cart.add(a, 1);
    cart.add(b, 1);

    cart.remove(a);
    cart.remove(a);
    assert_eq!(cart.product_ids(), vec![b]);

    cart.clear();
    assert!(cart.is_empty());
}

#[test]
fn stored_shape_is_a_plain_map() {
    let id = Uuid::nil();
    let mut cart = Cart::new();
    cart.add(id, 2);

    let stored = serde_json::to_value(&cart).unwrap();
    assert_eq!(stored, serde_json::json!({ id.to_string(): 2 }));

    let back: Cart = serde_json::from_value(stored).unwrap();
    assert_eq!(back, cart);
}
