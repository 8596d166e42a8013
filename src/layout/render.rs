use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::definition::{
    Element, ElementKind, HeadingTag, ImageFit, ImageProps, ImageRatio, Layout, ModelDefinition,
    PlaceholderMode,
};
use crate::entity::products;

const NO_DESCRIPTION: &str = "No description";
const BADGE_TEXT: &str = "Badge";
const BADGE_BG: &str = "#DCFCE7";
const BADGE_COLOR: &str = "#166534";
const IMAGE_ROUNDED: &str = "rounded";

/// The product fields a layout can reference.
#[derive(Debug, Clone)]
pub struct RenderSubject<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub slug: &'a str,
    pub price: Decimal,
    pub description: Option<&'a str>,
    pub image_url: Option<&'a str>,
}

impl<'a> From<&'a products::Model> for RenderSubject<'a> {
    fn from(product: &'a products::Model) -> Self {
        Self {
            id: product.id,
            name: &product.name,
            slug: &product.slug,
            price: product.price,
            description: product.description.as_deref(),
            image_url: product.image_url.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderTree {
    pub layout: Layout,
    /// Image elements, shown in the media column.
    pub primary: Vec<RenderNode>,
    pub secondary: Vec<RenderNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RenderNode {
    Image(ImageNode),
    Title {
        id: String,
        tag: HeadingTag,
        text: String,
    },
    Price {
        id: String,
        amount: Decimal,
        display: String,
    },
    Description {
        id: String,
        html: String,
    },
    Badge {
        id: String,
        text: String,
        bg: String,
        color: String,
    },
    Divider {
        id: String,
    },
    Html {
        id: String,
        html: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageNode {
    pub id: String,
    pub src: String,
    pub alt: String,
    pub ratio: ImageRatio,
    pub fit: ImageFit,
    pub rounded: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<String>,
    pub border: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub new_tab: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_below: Option<String>,
}

/// Single pass over the definition. Hidden elements are dropped, the rest are sorted stably by
/// `order` and split into the image region and everything else.
pub fn render(definition: &ModelDefinition, product: &RenderSubject<'_>) -> RenderTree {
    let mut tree = RenderTree {
        layout: definition.layout,
        primary: Vec::new(),
        secondary: Vec::new(),
    };

    for element in definition.visible_in_order() {
        match render_element(element, product) {
            Some(node @ RenderNode::Image(_)) => tree.primary.push(node),
            Some(node) => tree.secondary.push(node),
            None => {}
        }
    }

    tree
}

/// Renders with `active_definition` when the product's model is active, otherwise with the
/// built-in layout.
pub fn render_for_product(
    product: &RenderSubject<'_>,
    active_definition: Option<&ModelDefinition>,
) -> RenderTree {
    match active_definition {
        Some(definition) => render(definition, product),
        None => render(&ModelDefinition::builtin(), product),
    }
}

fn render_element(element: &Element, product: &RenderSubject<'_>) -> Option<RenderNode> {
    let id = element.id.clone();
    let node = match &element.kind {
        ElementKind::Image(props) => RenderNode::Image(image_node(id, props, product)),
        ElementKind::Title(props) => RenderNode::Title {
            id,
            tag: props.tag.unwrap_or_default(),
            text: product.name.to_string(),
        },
        ElementKind::Price => RenderNode::Price {
            id,
            amount: product.price,
            display: format!("${:.2}", product.price.round_dp(2)),
        },
        ElementKind::Description => RenderNode::Description {
            id,
            html: present(product.description)
                .unwrap_or(NO_DESCRIPTION)
                .to_string(),
        },
        ElementKind::Badge(props) => RenderNode::Badge {
            id,
            text: text_or(&props.text, BADGE_TEXT),
            bg: text_or(&props.bg, BADGE_BG),
            color: text_or(&props.color, BADGE_COLOR),
        },
        ElementKind::Divider => RenderNode::Divider { id },
        ElementKind::Html(props) => RenderNode::Html {
            id,
            html: text_or(&props.html, ""),
        },
        ElementKind::Unknown { .. } => return None,
    };
    Some(node)
}

fn image_node(id: String, props: &ImageProps, product: &RenderSubject<'_>) -> ImageNode {
    let caption = if props.show_caption.unwrap_or(false) {
        present(props.caption.as_deref()).map(str::to_string)
    } else {
        None
    };

    ImageNode {
        id,
        src: image_source(props, product),
        alt: text_or(&props.alt, product.name),
        ratio: props.ratio.unwrap_or_default(),
        fit: props.fit.unwrap_or_default(),
        rounded: text_or(&props.rounded, IMAGE_ROUNDED),
        shadow: present(props.shadow.as_deref()).map(str::to_string),
        border: props.border.unwrap_or(false),
        link: present(props.link.as_deref()).map(str::to_string),
        new_tab: props.new_tab.unwrap_or(false),
        caption,
        html_below: present(props.html_below.as_deref()).map(str::to_string),
    }
}

/// Explicit `src`, then the product image, then a placeholder unless the mode is `never`.
fn image_source(props: &ImageProps, product: &RenderSubject<'_>) -> String {
    if let Some(src) = present(props.src.as_deref()) {
        return src.to_string();
    }
    if let Some(url) = present(product.image_url) {
        return url.to_string();
    }
    match props.placeholder_mode.unwrap_or_default() {
        PlaceholderMode::Auto | PlaceholderMode::Always => {
            match present(props.placeholder_url.as_deref()) {
                Some(url) => url.to_string(),
                None => placeholder_for(product),
            }
        }
        PlaceholderMode::Never => String::new(),
    }
}

fn placeholder_for(product: &RenderSubject<'_>) -> String {
    let seed = match present(Some(product.slug)) {
        Some(slug) => slug.to_string(),
        None => product.id.to_string(),
    };
    format!(
        "https://picsum.photos/seed/{}/640/640",
        encode_uri_component(&seed)
    )
}

/// Percent-encodes everything outside the URI component unreserved set.
pub fn encode_uri_component(input: &str) -> String {
    const UNRESERVED: &[u8] = b"-_.!~*'()";
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        if byte.is_ascii_alphanumeric() || UNRESERVED.contains(&byte) {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn text_or(value: &Option<String>, fallback: &str) -> String {
    present(value.as_deref()).unwrap_or(fallback).to_string()
}
