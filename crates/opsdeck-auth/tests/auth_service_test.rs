//! Integration tests for the authentication service.

use opsdeck_auth::config::AuthConfig;
use opsdeck_auth::service::{AuthService, LoginInput};
use opsdeck_auth::token;
use opsdeck_core::error::OpsError;
use opsdeck_core::models::user::{CreateUser, Role, UserStatus};
use opsdeck_core::repository::UserRepository;
use opsdeck_db::repository::SurrealUserRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

fn test_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "integration-test-secret".into(),
        token_lifetime_secs: 86_400,
        jwt_issuer: "opsdeck-test".into(),
        pepper: None,
    }
}

/// Spin up an in-memory DB, run migrations, and create an active user.
async fn setup() -> (
    SurrealUserRepository<surrealdb::engine::local::Db>,
    uuid::Uuid, // user_id
) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    opsdeck_db::run_migrations(&db).await.unwrap();

    let user_repo = SurrealUserRepository::new(db);
    let user = user_repo
        .create(CreateUser {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "correct-horse-battery".into(),
            role: Role::Manager,
        })
        .await
        .unwrap();

    (user_repo, user.id)
}

#[tokio::test]
async fn login_happy_path() {
    let (user_repo, user_id) = setup().await;
    let config = test_config();
    let svc = AuthService::new(user_repo, config.clone());

    let result = svc
        .login(LoginInput {
            username: "alice".into(),
            password: "correct-horse-battery".into(),
        })
        .await
        .unwrap();

    assert!(!result.token.is_empty());
    assert_eq!(result.expires_in, 86_400);
    assert_eq!(result.user_id, user_id);
    assert_eq!(result.role, Role::Manager);

    // The token round-trips to the same identity and role that were
    // stored.
    let claims = token::decode_token(&result.token, &config).unwrap();
    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.role, Role::Manager);
    assert_eq!(claims.iss, "opsdeck-test");
}

#[tokio::test]
async fn wrong_password_and_unknown_username_are_indistinguishable() {
    let (user_repo, _) = setup().await;
    let svc = AuthService::new(user_repo, test_config());

    let wrong_password = svc
        .login(LoginInput {
            username: "alice".into(),
            password: "wrong-password".into(),
        })
        .await
        .unwrap_err();

    let unknown_user = svc
        .login(LoginInput {
            username: "nobody".into(),
            password: "irrelevant".into(),
        })
        .await
        .unwrap_err();

    // Same variant, same reason — no username enumeration.
    match (&wrong_password, &unknown_user) {
        (
            OpsError::Unauthorized { reason: a },
            OpsError::Unauthorized { reason: b },
        ) => assert_eq!(a, b),
        other => panic!("expected two Unauthorized errors, got {other:?}"),
    }
}

#[tokio::test]
async fn inactive_account_cannot_login() {
    let (user_repo, user_id) = setup().await;

    user_repo
        .set_status(user_id, UserStatus::Inactive)
        .await
        .unwrap();

    let svc = AuthService::new(user_repo, test_config());
    let err = svc
        .login(LoginInput {
            username: "alice".into(),
            password: "correct-horse-battery".into(),
        })
        .await
        .unwrap_err();

    match &err {
        OpsError::Unauthorized { reason } => {
            assert!(
                reason.contains("inactive"),
                "expected 'inactive' in reason: {reason}"
            );
        }
        other => panic!("expected Unauthorized, got {other:?}"),
    }
}

#[tokio::test]
async fn issued_token_validates_statelessly() {
    let (user_repo, user_id) = setup().await;
    let config = test_config();
    let svc = AuthService::new(user_repo, config.clone());

    let login = svc
        .login(LoginInput {
            username: "alice".into(),
            password: "correct-horse-battery".into(),
        })
        .await
        .unwrap();

    // Validation needs no repository — only the token and config.
    let validated = token::validate_token(&login.token, &config).unwrap();
    assert_eq!(validated.0.user_id().unwrap(), user_id);

    // Tampering breaks it.
    let tampered = format!("{}x", login.token);
    assert!(token::validate_token(&tampered, &config).is_err());
}
