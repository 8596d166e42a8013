mod common;

use storefront_api::{
    dto::auth::{LoginRequest, RegisterRequest},
    error::AppError,
    middleware::auth::AuthUser,
    services::{auth_service, user_service},
};

fn register(name: &str, email: &str, password: &str) -> RegisterRequest {
    RegisterRequest {
        name: name.into(),
        email: email.into(),
        password: password.into(),
    }
}

#[tokio::test]
async fn register_login_and_me() -> anyhow::Result<()> {
    let Some(url) = common::database_url() else {
        return Ok(());
    };
    if std::env::var("JWT_SECRET").is_err() {
        // Only test in this binary, so nothing else reads the environment concurrently.
        unsafe { std::env::set_var("JWT_SECRET", "test-secret") };
    }
    let state = common::setup_state(&url).await?;

    let short = auth_service::register_user(&state, register("Ann", "ann@example.com", "12345")).await;
    assert!(matches!(short, Err(AppError::Validation(ref e)) if e.contains("password")));

    let ann = auth_service::register_user(&state, register(" Ann ", "Ann@Example.com", "secret1"))
        .await?
        .data
        .unwrap();
    assert_eq!(ann.name, "Ann");
    assert_eq!(ann.email, "ann@example.com");
    assert!(!ann.is_admin);

    let taken = auth_service::register_user(&state, register("Other", "ANN@example.com", "secret1")).await;
    assert!(matches!(taken, Err(AppError::Validation(ref e)) if e.contains("email")));

    let wrong = auth_service::login_user(
        &state,
        LoginRequest {
            email: "ann@example.com".into(),
            password: "nope".into(),
        },
    )
    .await;
    assert!(matches!(wrong, Err(AppError::BadRequest(_))));

    let login = auth_service::login_user(
        &state,
        LoginRequest {
            email: " ANN@example.com ".into(),
            password: "secret1".into(),
        },
    )
    .await?
    .data
    .unwrap();
    assert!(login.token.starts_with("Bearer "));
    assert_eq!(login.user.id, ann.id);

    let me = AuthUser {
        user_id: ann.id,
        role: "user".into(),
    };
    let current = auth_service::current_user(&state, &me).await?.data.unwrap();
    assert_eq!(current.email, "ann@example.com");

    let admin = common::create_account(&state, "Root", "root@example.com", true).await?;
    user_service::delete_user(&state, &admin, ann.id).await?;
    assert!(matches!(
        auth_service::current_user(&state, &me).await,
        Err(AppError::NotFound)
    ));

    Ok(())
}
