//! Card presentation document edited from the dashboard. One stored row holds a `home` and a
//! `section` scope with the same schema; documents saved before scopes existed are flat.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StyleScope {
    #[default]
    Home,
    Section,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleDocument {
    pub home: CardStyle,
    pub section: CardStyle,
}

impl StyleDocument {
    pub fn scope(&self, scope: StyleScope) -> &CardStyle {
        match scope {
            StyleScope::Home => &self.home,
            StyleScope::Section => &self.section,
        }
    }

    pub fn enforce_cta(mut self) -> Self {
        self.home.enforce_cta();
        self.section.enforce_cta();
        self
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// A style document as found in storage or in a request body.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredStyle {
    /// Flat card style from before scopes; applies to both scopes.
    Legacy(CardStyle),
    Scoped(StyleDocument),
}

impl StoredStyle {
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let Value::Object(map) = &value else {
            return Err(<serde_json::Error as serde::de::Error>::custom(
                "style must be a JSON object",
            ));
        };
        let flat = map.contains_key("card")
            && map.contains_key("image")
            && !map.contains_key("home")
            && !map.contains_key("section");
        if flat {
            Ok(StoredStyle::Legacy(serde_json::from_value(value)?))
        } else {
            Ok(StoredStyle::Scoped(serde_json::from_value(value)?))
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, StoredStyle::Legacy(_))
    }

    pub fn into_document(self) -> StyleDocument {
        match self {
            StoredStyle::Legacy(style) => StyleDocument {
                home: style.clone(),
                section: style,
            },
            StoredStyle::Scoped(document) => document,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardStyle {
    pub card: CardBox,
    pub image: ImageBox,
    pub price: Toggle,
    pub hover: Toggle,
    pub buttons: Buttons,
    pub view_details: Toggle,
    pub add_to_cart: Toggle,
    pub badge: Badge,
    pub alt_text: AltText,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CardStyle {
    /// Shown buttons must offer at least one action; add-to-cart wins when both are off.
    pub fn enforce_cta(&mut self) {
        if self.buttons.show && !self.view_details.show && !self.add_to_cart.show {
            self.add_to_cart.show = true;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Corners {
    #[serde(deserialize_with = "radius")]
    pub rounded_top_left: i64,
    #[serde(deserialize_with = "radius")]
    pub rounded_top_right: i64,
    #[serde(deserialize_with = "radius")]
    pub rounded_bottom_left: i64,
    #[serde(deserialize_with = "radius")]
    pub rounded_bottom_right: i64,
}

impl Default for Corners {
    fn default() -> Self {
        Self {
            rounded_top_left: 8,
            rounded_top_right: 8,
            rounded_bottom_left: 8,
            rounded_bottom_right: 8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardBox {
    pub shadow: String,
    #[serde(flatten)]
    pub corners: Corners,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for CardBox {
    fn default() -> Self {
        Self {
            shadow: "shadow".into(),
            corners: Corners::default(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageBox {
    pub ratio: String,
    pub fit: String,
    #[serde(flatten)]
    pub corners: Corners,
    pub placeholder_mode: String,
    pub placeholder_url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ImageBox {
    fn default() -> Self {
        Self {
            ratio: "1:1".into(),
            fit: "cover".into(),
            corners: Corners::default(),
            placeholder_mode: "auto".into(),
            placeholder_url: String::new(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Toggle {
    #[serde(deserialize_with = "flag")]
    pub show: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Toggle {
    fn default() -> Self {
        Self {
            show: true,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Buttons {
    #[serde(deserialize_with = "flag")]
    pub show: bool,
    /// `over` the image or `below` it.
    pub position: String,
    #[serde(deserialize_with = "radius")]
    pub rounded: i64,
    /// `solid` or `outline`.
    pub style: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Buttons {
    fn default() -> Self {
        Self {
            show: true,
            position: "over".into(),
            rounded: 9999,
            style: "solid".into(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Badge {
    #[serde(deserialize_with = "flag")]
    pub show: bool,
    pub position: String,
    pub text: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Badge {
    fn default() -> Self {
        Self {
            show: false,
            position: "top-left".into(),
            text: String::new(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AltText {
    #[serde(deserialize_with = "flag")]
    pub show: bool,
    pub position: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for AltText {
    fn default() -> Self {
        Self {
            show: false,
            position: "below".into(),
            extra: Map::new(),
        }
    }
}

fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Bool(b) => Ok(b),
        Value::Number(n) => Ok(n.as_f64().is_some_and(|n| n != 0.0)),
        Value::String(s) => Ok(matches!(s.trim(), "1" | "true" | "on" | "yes")),
        Value::Null => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "expected a boolean, got {other}"
        ))),
    }
}

fn radius<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64))
            .ok_or_else(|| serde::de::Error::custom("radius out of range")),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(|f| f.round() as i64)
            .map_err(|_| serde::de::Error::custom(format!("`{s}` is not a number"))),
        other => Err(serde::de::Error::custom(format!(
            "expected a number, got {other}"
        ))),
    }
}
