use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Menu, MenuItem};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct MenuRequest {
    #[validate(length(min = 1, max = 255, message = "The name field is required."))]
    pub name: String,
    /// `frontend` or `backend` in the shipped theme, free text otherwise.
    #[validate(length(min = 1, max = 100, message = "The location field is required."))]
    pub location: String,
    pub is_active: Option<bool>,
}

impl MenuRequest {
    pub fn normalize(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.location = self.location.trim().to_string();
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MenuAlign {
    #[default]
    Left,
    Right,
}

impl MenuAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuAlign::Left => "left",
            MenuAlign::Right => "right",
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct MenuItemRequest {
    #[validate(length(min = 1, max = 255, message = "The title field is required."))]
    pub title: String,
    #[validate(length(min = 1, max = 2048, message = "The url field is required."))]
    pub url: String,
    pub parent_id: Option<Uuid>,
    /// Defaults to `_self`.
    #[validate(length(max = 20))]
    pub target: Option<String>,
    pub visible: Option<bool>,
    #[validate(length(max = 255))]
    pub icon: Option<String>,
    pub align: Option<MenuAlign>,
}

impl MenuItemRequest {
    /// Trims text fields; a blank target or icon reads as absent.
    pub fn normalize(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.url = self.url.trim().to_string();
        self.target = blank_to_none(self.target);
        self.icon = blank_to_none(self.icon);
        self
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct MenuOrderEntry {
    pub id: Uuid,
    #[validate(range(min = 0, message = "Position must be zero or more."))]
    pub position: i32,
    pub parent_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ReorderMenuRequest {
    #[validate(nested)]
    pub items: Vec<MenuOrderEntry>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MenuItemNode {
    #[serde(flatten)]
    pub item: MenuItem,
    pub children: Vec<MenuItem>,
}

/// A menu with its items two levels deep, each level ordered by position.
#[derive(Debug, Serialize, ToSchema)]
pub struct MenuTree {
    pub menu: Menu,
    pub items: Vec<MenuItemNode>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct MenuList {
    #[schema(value_type = Vec<Menu>)]
    pub items: Vec<Menu>,
}
