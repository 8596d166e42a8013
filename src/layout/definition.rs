use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{AppResult, FieldErrors};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Vertical,
}

/// Ordered list of typed elements describing how a product page is laid out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDefinition {
    #[serde(default)]
    pub layout: Layout,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Default for ModelDefinition {
    fn default() -> Self {
        Self::starter()
    }
}

impl ModelDefinition {
    /// Four-element set given to a freshly created model: image, title, price, description.
    pub fn starter() -> Self {
        let id = || Uuid::new_v4().to_string();
        Self {
            layout: Layout::Vertical,
            elements: vec![
                Element::new(
                    id(),
                    ElementKind::Image(ImageProps {
                        ratio: Some(ImageRatio::Square),
                        ..ImageProps::default()
                    }),
                    0,
                ),
                Element::new(
                    id(),
                    ElementKind::Title(TitleProps {
                        tag: Some(HeadingTag::H1),
                    }),
                    1,
                ),
                Element::new(id(), ElementKind::Price, 2),
                Element::new(id(), ElementKind::Description, 3),
            ],
        }
    }

    /// Layout used for products without an active model. Missing images stay blank.
    pub fn builtin() -> Self {
        Self {
            layout: Layout::Vertical,
            elements: vec![
                Element::new(
                    "default-image",
                    ElementKind::Image(ImageProps {
                        ratio: Some(ImageRatio::Square),
                        fit: Some(ImageFit::Cover),
                        placeholder_mode: Some(PlaceholderMode::Never),
                        ..ImageProps::default()
                    }),
                    0,
                ),
                Element::new(
                    "default-title",
                    ElementKind::Title(TitleProps {
                        tag: Some(HeadingTag::H1),
                    }),
                    1,
                ),
                Element::new("default-price", ElementKind::Price, 2),
                Element::new("default-description", ElementKind::Description, 3),
            ],
        }
    }

    /// Element ids must be present and unique before a definition is stored.
    pub fn validate(&self) -> AppResult<()> {
        let mut errors = FieldErrors::new();
        let mut seen = HashSet::new();
        for (index, element) in self.elements.iter().enumerate() {
            let id = element.id.trim();
            if id.is_empty() {
                errors.add("definition", format!("element #{index} is missing an id"));
            } else if !seen.insert(id) {
                errors.add("definition", format!("duplicate element id `{id}`"));
            }
        }
        errors.into_result()
    }

    /// Visible elements in ascending `order`; ties keep their stored position.
    pub fn visible_in_order(&self) -> Vec<&Element> {
        let mut elements: Vec<&Element> = self.elements.iter().filter(|e| e.visible).collect();
        elements.sort_by(|a, b| a.order.total_cmp(&b.order));
        elements
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawElement", into = "RawElement")]
pub struct Element {
    pub id: String,
    pub kind: ElementKind,
    pub visible: bool,
    /// Editors may send fractional positions when dropping between two elements.
    pub order: f64,
}

impl Element {
    pub fn new(id: impl Into<String>, kind: ElementKind, order: i64) -> Self {
        Self {
            id: id.into(),
            kind,
            visible: true,
            order: order as f64,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Image(ImageProps),
    Title(TitleProps),
    Price,
    Description,
    Badge(BadgeProps),
    Divider,
    Html(HtmlProps),
    /// Any tag this renderer does not know. Kept so saving does not drop it; renders as nothing.
    Unknown { type_name: String, props: Value },
}

impl ElementKind {
    pub fn type_name(&self) -> &str {
        match self {
            ElementKind::Image(_) => "image",
            ElementKind::Title(_) => "title",
            ElementKind::Price => "price",
            ElementKind::Description => "description",
            ElementKind::Badge(_) => "badge",
            ElementKind::Divider => "divider",
            ElementKind::Html(_) => "html",
            ElementKind::Unknown { type_name, .. } => type_name,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageRatio {
    #[serde(rename = "auto")]
    Auto,
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "4:3")]
    Standard,
    #[serde(rename = "16:9")]
    Wide,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFit {
    #[default]
    Cover,
    Contain,
    Fill,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderMode {
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingTag {
    #[default]
    H1,
    H2,
    H3,
    H4,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageProps {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub ratio: Option<ImageRatio>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub fit: Option<ImageFit>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub rounded: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub shadow: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool", skip_serializing_if = "Option::is_none")]
    pub border: Option<bool>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool", skip_serializing_if = "Option::is_none")]
    pub new_tab: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool", skip_serializing_if = "Option::is_none")]
    pub show_caption: Option<bool>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub html_below: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub placeholder_mode: Option<PlaceholderMode>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub placeholder_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleProps {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub tag: Option<HeadingTag>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeProps {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub bg: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmlProps {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

/// Wire shape of an element as the editor sends and stores it.
#[derive(Serialize, Deserialize)]
struct RawElement {
    #[serde(default)]
    id: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    props: Value,
    #[serde(default, deserialize_with = "lenient_bool")]
    visible: Option<bool>,
    #[serde(default)]
    order: Value,
}

impl TryFrom<RawElement> for Element {
    type Error = String;

    fn try_from(raw: RawElement) -> Result<Self, Self::Error> {
        let kind = match raw.kind.as_str() {
            "image" => ElementKind::Image(props_of(raw.props)?),
            "title" => ElementKind::Title(props_of(raw.props)?),
            "price" => ElementKind::Price,
            "description" => ElementKind::Description,
            "badge" => ElementKind::Badge(props_of(raw.props)?),
            "divider" => ElementKind::Divider,
            "html" => ElementKind::Html(props_of(raw.props)?),
            _ => ElementKind::Unknown {
                type_name: raw.kind.clone(),
                props: raw.props,
            },
        };
        Ok(Element {
            id: raw.id,
            kind,
            visible: raw.visible.unwrap_or(true),
            order: order_of(&raw.order),
        })
    }
}

impl From<Element> for RawElement {
    fn from(element: Element) -> Self {
        let kind = element.kind.type_name().to_string();
        let props = match element.kind {
            ElementKind::Image(props) => serde_json::to_value(props).unwrap_or_default(),
            ElementKind::Title(props) => serde_json::to_value(props).unwrap_or_default(),
            ElementKind::Badge(props) => serde_json::to_value(props).unwrap_or_default(),
            ElementKind::Html(props) => serde_json::to_value(props).unwrap_or_default(),
            ElementKind::Unknown { props, .. } => props,
            ElementKind::Price | ElementKind::Description | ElementKind::Divider => {
                Value::Object(Map::new())
            }
        };
        RawElement {
            id: element.id,
            kind,
            props,
            visible: Some(element.visible),
            order: order_value(element.order),
        }
    }
}

fn props_of<T: DeserializeOwned + Default>(props: Value) -> Result<T, String> {
    match props {
        Value::Null => Ok(T::default()),
        Value::Array(ref items) if items.is_empty() => Ok(T::default()),
        other => serde_json::from_value(other).map_err(|err| err.to_string()),
    }
}

fn order_of(value: &Value) -> f64 {
    let order = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    if order.is_finite() { order } else { 0.0 }
}

/// Whole positions stay integers in stored JSON.
fn order_value(order: f64) -> Value {
    if order.fract() == 0.0 && order.abs() < i64::MAX as f64 {
        Value::from(order as i64)
    } else {
        Value::from(order)
    }
}

/// Blank strings and values that do not fit the field read as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::String(ref s) if s.trim().is_empty() => None,
        other => serde_json::from_value(other).ok(),
    }))
}

/// Accepts real booleans plus the checkbox encodings an HTML form produces.
fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::Number(n)) => n.as_i64().map(|n| n != 0),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "on" | "yes" => Some(true),
            "0" | "false" | "off" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    })
}
