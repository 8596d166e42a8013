use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::User;

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 255, message = "The name field is required."))]
    pub name: String,
    #[validate(email(message = "The email must be a valid email address."), length(max = 255))]
    pub email: String,
    #[validate(length(min = 6, message = "The password must be at least 6 characters."))]
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl CreateUserRequest {
    pub fn normalize(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_lowercase();
        self
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 255, message = "The name field is required."))]
    pub name: String,
    #[validate(email(message = "The email must be a valid email address."), length(max = 255))]
    pub email: String,
    /// Omitted or blank keeps the current password.
    #[validate(length(min = 6, message = "The password must be at least 6 characters."))]
    pub password: Option<String>,
    /// Omitted keeps the current flag.
    pub is_admin: Option<bool>,
}

impl UpdateUserRequest {
    pub fn normalize(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_lowercase();
        self.password = self.password.filter(|p| !p.is_empty());
        self
    }
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct UserList {
    #[schema(value_type = Vec<User>)]
    pub items: Vec<User>,
}
