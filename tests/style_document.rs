use serde_json::json;
use storefront_api::style::{CardStyle, StoredStyle, StyleDocument, StyleScope};

#[test]
fn defaults_match_the_editor() {
    let style = CardStyle::default();
    assert_eq!(style.card.shadow, "shadow");
    assert_eq!(style.card.corners.rounded_top_left, 8);
    assert_eq!(style.image.ratio, "1:1");
    assert_eq!(style.image.placeholder_mode, "auto");
    assert!(style.price.show && style.view_details.show && style.add_to_cart.show);
    assert_eq!(style.buttons.rounded, 9999);
    assert!(!style.badge.show);
    assert_eq!(style.alt_text.position, "below");
}

#[test]
fn flat_document_is_read_as_legacy() {
    let stored = StoredStyle::from_value(json!({
        "card": { "shadow": "shadow-lg", "roundedTopLeft": "12" },
        "image": { "ratio": "4:3" },
        "badge": { "show": "1", "text": "Sale" }
    }))
    .unwrap();
    assert!(stored.is_legacy());

    let document = stored.into_document();
    assert_eq!(document.home, document.section);
    assert_eq!(document.home.card.shadow, "shadow-lg");
    assert_eq!(document.home.card.corners.rounded_top_left, 12);
    assert_eq!(document.home.card.corners.rounded_top_right, 8);
    assert_eq!(document.home.image.ratio, "4:3");
    assert!(document.home.badge.show);
    assert_eq!(document.home.badge.text, "Sale");
}

#[test]
fn scoped_document_keeps_each_scope() {
    let stored = StoredStyle::from_value(json!({
        "home": { "buttons": { "position": "below" } },
        "section": { "price": { "show": false } }
    }))
    .unwrap();
    assert!(!stored.is_legacy());

    let document = stored.into_document();
    assert_eq!(document.scope(StyleScope::Home).buttons.position, "below");
    assert!(document.scope(StyleScope::Home).price.show);
    assert!(!document.scope(StyleScope::Section).price.show);
    assert_eq!(document.scope(StyleScope::Section).buttons.position, "over");
}

#[test]
fn card_and_image_alongside_scopes_is_not_legacy() {
    let stored = StoredStyle::from_value(json!({
        "card": {}, "image": {}, "home": {}
    }))
    .unwrap();
    assert!(!stored.is_legacy());
}

#[test]
fn non_object_is_rejected() {
    assert!(StoredStyle::from_value(json!("flat")).is_err());
    assert!(StoredStyle::from_value(json!([1, 2])).is_err());
}

#[test]
fn shown_buttons_keep_one_action() {
    let mut style = CardStyle::default();
    style.view_details.show = false;
    style.add_to_cart.show = false;

    let document = StyleDocument {
        home: style.clone(),
        section: CardStyle {
            buttons: storefront_api::style::Buttons {
                show: false,
                ..Default::default()
            },
            ..style
        },
    }
    .enforce_cta();

    assert!(document.home.add_to_cart.show);
    assert!(!document.section.add_to_cart.show, "hidden buttons need no action");
}

#[test]
fn unknown_keys_survive_normalization() {
    let stored = StoredStyle::from_value(json!({
        "card": { "shadow": "none", "border": "1px" },
        "image": {},
        "fontFamily": "serif"
    }))
    .unwrap();
    let document = stored.into_document();
    let value = document.to_value();
    assert_eq!(value["home"]["card"]["border"], "1px");
    assert_eq!(value["section"]["fontFamily"], "serif");
    assert!(value.get("card").is_none());
}
