use axum::{http::StatusCode, response::IntoResponse};
use storefront_api::{
    dto::{
        auth::RegisterRequest,
        homepage::SectionRequest,
        menus::{MenuItemRequest, MenuRequest},
        product_models::{CreateProductModelRequest, UpdateProductModelRequest},
        users::{CreateUserRequest, UpdateUserRequest},
    },
    error::AppError,
};
use validator::Validate;

fn rejected_field<T: Validate>(request: &T, field: &str) -> bool {
    match request.validate() {
        Err(errors) => match AppError::from(errors) {
            AppError::Validation(fields) => fields.contains(field),
            _ => false,
        },
        Ok(()) => false,
    }
}

#[test]
fn blank_model_name_is_unprocessable() {
    let request = CreateProductModelRequest {
        name: "   ".into(),
        preview_product_id: None,
        is_active: None,
        definition: None,
    }
    .normalize();
    assert_eq!(request.name, "");

    let errors = request.validate().expect_err("blank name");
    let response = AppError::from(errors).into_response();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let update = UpdateProductModelRequest {
        name: "\t\n".into(),
        preview_product_id: None,
        is_active: None,
        definition: None,
    }
    .normalize();
    assert!(rejected_field(&update, "name"));
}

#[test]
fn blank_titles_and_names_fail_on_their_field() {
    let section = SectionRequest {
        title: "  ".into(),
        is_active: None,
        position: None,
        categories: Vec::new(),
    }
    .normalize();
    assert!(rejected_field(&section, "title"));

    let menu = MenuRequest {
        name: " ".into(),
        location: "  ".into(),
        is_active: None,
    }
    .normalize();
    assert!(rejected_field(&menu, "name"));
    assert!(rejected_field(&menu, "location"));

    let item = MenuItemRequest {
        title: "   ".into(),
        url: " /shop ".into(),
        parent_id: None,
        target: Some("  ".into()),
        visible: None,
        icon: Some(" ".into()),
        align: None,
    }
    .normalize();
    assert!(rejected_field(&item, "title"));
    assert!(!rejected_field(&item, "url"));
    assert_eq!(item.url, "/shop");
    assert_eq!(item.target, None);
    assert_eq!(item.icon, None);

    let user = CreateUserRequest {
        name: "   ".into(),
        email: " Sam@Example.com ".into(),
        password: "secret123".into(),
        is_admin: false,
    }
    .normalize();
    assert!(rejected_field(&user, "name"));
    assert!(!rejected_field(&user, "email"));
    assert_eq!(user.email, "sam@example.com");

    let update = UpdateUserRequest {
        name: " ".into(),
        email: "sam@example.com".into(),
        password: Some(String::new()),
        is_admin: None,
    }
    .normalize();
    assert!(rejected_field(&update, "name"));
    assert_eq!(update.password, None);

    let register = RegisterRequest {
        name: "  ".into(),
        email: "sam@example.com".into(),
        password: "secret123".into(),
    }
    .normalize();
    assert!(rejected_field(&register, "name"));
}

#[test]
fn padded_values_are_trimmed_before_storage() {
    let model = CreateProductModelRequest {
        name: "  Poster  ".into(),
        preview_product_id: None,
        is_active: None,
        definition: None,
    }
    .normalize();
    assert!(model.validate().is_ok());
    assert_eq!(model.name, "Poster");

    let section = SectionRequest {
        title: " Deals ".into(),
        is_active: None,
        position: None,
        categories: Vec::new(),
    }
    .normalize();
    assert!(section.validate().is_ok());
    assert_eq!(section.title, "Deals");
}
