use rust_decimal::Decimal;
use serde_json::json;
use storefront_api::{
    error::AppError,
    layout::{
        ElementKind, ModelDefinition, RenderNode, RenderSubject, encode_uri_component, render,
        render_for_product,
    },
};
use uuid::Uuid;

fn phone<'a>(image_url: Option<&'a str>, description: Option<&'a str>) -> RenderSubject<'a> {
    RenderSubject {
        id: Uuid::nil(),
        name: "Phone",
        slug: "phone-ab12c",
        price: Decimal::new(19999, 2),
        description,
        image_url,
    }
}

fn definition(value: serde_json::Value) -> ModelDefinition {
    serde_json::from_value(value).expect("definition parses")
}

#[test]
fn builtin_layout_without_model() {
    let product = phone(None, None);
    let tree = render_for_product(&product, None);

    assert_eq!(tree.primary.len(), 1);
    match &tree.primary[0] {
        RenderNode::Image(image) => {
            assert_eq!(image.id, "default-image");
            assert_eq!(image.src, "", "built-in layout never uses a placeholder");
            assert_eq!(image.alt, "Phone");
        }
        other => panic!("expected image, got {other:?}"),
    }

    assert_eq!(tree.secondary.len(), 3);
    assert!(matches!(&tree.secondary[0], RenderNode::Title { text, .. } if text == "Phone"));
    assert!(matches!(&tree.secondary[1], RenderNode::Price { display, .. } if display == "$199.99"));
    assert!(
        matches!(&tree.secondary[2], RenderNode::Description { html, .. } if html == "No description")
    );
}

#[test]
fn active_definition_replaces_builtin() {
    let def = definition(json!({
        "layout": "vertical",
        "elements": [
            { "id": "p", "type": "price", "props": {}, "visible": true, "order": 0 }
        ]
    }));
    let product = phone(None, None);

    let tree = render_for_product(&product, Some(&def));
    assert!(tree.primary.is_empty());
    assert_eq!(tree.secondary.len(), 1);
    assert!(matches!(&tree.secondary[0], RenderNode::Price { id, .. } if id == "p"));
}

#[test]
fn hidden_and_unknown_elements_render_nothing() {
    let def = definition(json!({
        "elements": [
            { "id": "t", "type": "title", "props": { "tag": "h2" }, "order": 1 },
            { "id": "b", "type": "badge", "props": { "text": "New" }, "order": 1 },
            { "id": "d", "type": "divider", "visible": false, "order": 0 },
            { "id": "v", "type": "video", "props": { "src": "x.mp4" }, "order": 0 },
            { "id": "i", "type": "image", "props": [], "order": 5 }
        ]
    }));
    let product = phone(Some("https://cdn.example.com/phone.jpg"), Some("<p>Fast</p>"));
    let tree = render(&def, &product);

    assert_eq!(tree.primary.len(), 1);
    assert!(matches!(&tree.primary[0], RenderNode::Image(img) if img.src == "https://cdn.example.com/phone.jpg"));

    let ids: Vec<&str> = tree
        .secondary
        .iter()
        .map(|node| match node {
            RenderNode::Title { id, .. } | RenderNode::Badge { id, .. } => id.as_str(),
            other => panic!("unexpected node {other:?}"),
        })
        .collect();
    assert_eq!(ids, ["t", "b"], "equal orders keep their stored position");
}

#[test]
fn fractional_orders_sort_by_value() {
    let def = definition(json!({
        "elements": [
            { "id": "t", "type": "title", "order": 1.7 },
            { "id": "b", "type": "badge", "props": { "text": "Sale" }, "order": 1.2 },
            { "id": "p", "type": "price", "order": "0.5" }
        ]
    }));
    let tree = render(&def, &phone(None, None));
    let ids: Vec<&str> = tree
        .secondary
        .iter()
        .map(|node| match node {
            RenderNode::Title { id, .. } | RenderNode::Badge { id, .. } | RenderNode::Price { id, .. } => {
                id.as_str()
            }
            other => panic!("unexpected node {other:?}"),
        })
        .collect();
    assert_eq!(ids, ["p", "b", "t"]);

    let stored = serde_json::to_value(&def).unwrap();
    assert_eq!(stored["elements"][1]["order"], 1.2);
}

#[test]
fn badge_defaults_fill_blank_props() {
    let def = definition(json!({
        "elements": [{ "id": "b", "type": "badge", "props": { "text": "  ", "bg": "#000" } }]
    }));
    let tree = render(&def, &phone(None, None));
    assert_eq!(
        tree.secondary,
        vec![RenderNode::Badge {
            id: "b".into(),
            text: "Badge".into(),
            bg: "#000".into(),
            color: "#166534".into(),
        }]
    );
}

#[test]
fn image_source_falls_back_to_placeholder() {
    let auto = definition(json!({
        "elements": [{ "id": "i", "type": "image", "props": { "placeholderMode": "auto" } }]
    }));
    let custom = definition(json!({
        "elements": [{ "id": "i", "type": "image", "props": {
            "placeholderMode": "always",
            "placeholderUrl": "https://img.example.com/blank.png"
        } }]
    }));
    let never = definition(json!({
        "elements": [{ "id": "i", "type": "image", "props": { "placeholderMode": "never" } }]
    }));
    let explicit = definition(json!({
        "elements": [{ "id": "i", "type": "image", "props": { "src": "https://img.example.com/a.png" } }]
    }));

    let src = |def: &ModelDefinition, product: &RenderSubject<'_>| match &render(def, product).primary[0] {
        RenderNode::Image(img) => img.src.clone(),
        other => panic!("expected image, got {other:?}"),
    };

    let product = phone(None, None);
    assert_eq!(src(&auto, &product), "https://picsum.photos/seed/phone-ab12c/640/640");
    assert_eq!(src(&custom, &product), "https://img.example.com/blank.png");
    assert_eq!(src(&never, &product), "");
    assert_eq!(
        src(&explicit, &phone(Some("https://cdn.example.com/p.jpg"), None)),
        "https://img.example.com/a.png"
    );

    let unnamed = RenderSubject { slug: "", ..product };
    assert_eq!(
        src(&auto, &unnamed),
        format!("https://picsum.photos/seed/{}/640/640", Uuid::nil())
    );
}

#[test]
fn uri_component_encoding() {
    assert_eq!(encode_uri_component("phone-ab12c"), "phone-ab12c");
    assert_eq!(encode_uri_component("a b/c"), "a%20b%2Fc");
    assert_eq!(encode_uri_component("café"), "caf%C3%A9");
}

#[test]
fn rendering_is_deterministic() {
    let def = ModelDefinition::starter();
    let product = phone(Some("https://cdn.example.com/p.jpg"), Some("Body"));
    assert_eq!(render(&def, &product), render(&def, &product));
}

#[test]
fn starter_definition_has_four_unique_elements() {
    let def = ModelDefinition::starter();
    let kinds: Vec<&str> = def.elements.iter().map(|e| e.kind.type_name()).collect();
    assert_eq!(kinds, ["image", "title", "price", "description"]);
    assert!(def.validate().is_ok());
}

#[test]
fn form_encoded_fields_are_tolerated() {
    let def = definition(json!({
        "elements": [
            { "id": "a", "type": "image", "visible": "on", "order": "3",
              "props": { "border": "1", "newTab": "off", "ratio": "16:9", "fit": "", "caption": "" } },
            { "id": "b", "type": "title", "visible": "0", "order": 1 }
        ]
    }));

    let image = &def.elements[0];
    assert!(image.visible);
    assert_eq!(image.order, 3.0);
    match &image.kind {
        ElementKind::Image(props) => {
            assert_eq!(props.border, Some(true));
            assert_eq!(props.new_tab, Some(false));
            assert_eq!(props.fit, None);
            assert_eq!(props.caption, None);
        }
        other => panic!("expected image, got {other:?}"),
    }
    assert!(!def.elements[1].visible);
}

#[test]
fn unknown_elements_survive_a_save() {
    let def = definition(json!({
        "elements": [{ "id": "v", "type": "video", "props": { "src": "x.mp4" }, "order": 2 }]
    }));
    let stored = serde_json::to_value(&def).unwrap();
    assert_eq!(stored["elements"][0]["type"], "video");
    assert_eq!(stored["elements"][0]["props"]["src"], "x.mp4");
    assert_eq!(stored["elements"][0]["order"], 2);
}

#[test]
fn duplicate_or_missing_ids_are_rejected() {
    let def = definition(json!({
        "elements": [
            { "id": "x", "type": "price" },
            { "id": "x", "type": "divider" },
            { "type": "description" }
        ]
    }));
    match def.validate() {
        Err(AppError::Validation(errors)) => {
            assert!(errors.contains("definition"));
            assert_eq!(errors.0["definition"].len(), 2);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}
