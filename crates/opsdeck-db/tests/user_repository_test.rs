//! Integration tests for the User repository using in-memory SurrealDB.

use opsdeck_core::error::OpsError;
use opsdeck_core::models::user::{CreateUser, Role, UserStatus};
use opsdeck_core::repository::UserRepository;
use opsdeck_db::repository::SurrealUserRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

/// Helper: spin up an in-memory DB and run migrations.
async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    opsdeck_db::run_migrations(&db).await.unwrap();
    db
}

fn alice() -> CreateUser {
    CreateUser {
        username: "alice".into(),
        email: "alice@example.com".into(),
        password: "SuperSecret123!".into(),
        role: Role::User,
    }
}

#[tokio::test]
async fn create_and_get_user() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    let user = repo.create(alice()).await.unwrap();

    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.role, Role::User);
    assert_eq!(user.status, UserStatus::Active);

    // Password should be hashed, not stored in plaintext.
    assert_ne!(user.password_hash, "SuperSecret123!");
    assert!(user.password_hash.starts_with("$argon2id$"));

    // Get by ID should return the same user.
    let fetched = repo.get_by_id(user.id).await.unwrap();
    assert_eq!(fetched.id, user.id);
    assert_eq!(fetched.username, "alice");
}

#[tokio::test]
async fn get_user_by_username() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    let user = repo.create(alice()).await.unwrap();

    let fetched = repo.get_by_username("alice").await.unwrap();
    assert_eq!(fetched.id, user.id);

    let missing = repo.get_by_username("nobody").await;
    assert!(matches!(missing, Err(OpsError::NotFound { .. })));
}

#[tokio::test]
async fn invalid_input_writes_nothing() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    let err = repo
        .create(CreateUser {
            username: String::new(),
            email: "not-an-email".into(),
            password: "x".into(),
            role: Role::User,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, OpsError::Validation { .. }));
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn duplicate_username_conflicts_without_writing() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    repo.create(alice()).await.unwrap();

    let err = repo
        .create(CreateUser {
            username: "alice".into(),
            email: "second@example.com".into(),
            password: "pass123".into(),
            role: Role::User,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, OpsError::Conflict { .. }));
    // Row count unchanged — the duplicate performed no write.
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn duplicate_email_conflicts_without_writing() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    repo.create(alice()).await.unwrap();

    let err = repo
        .create(CreateUser {
            username: "alice2".into(),
            email: "alice@example.com".into(),
            password: "pass123".into(),
            role: Role::User,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, OpsError::Conflict { .. }));
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn set_status_soft_disables() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    let user = repo.create(alice()).await.unwrap();
    assert_eq!(repo.count_active().await.unwrap(), 1);

    let disabled = repo
        .set_status(user.id, UserStatus::Inactive)
        .await
        .unwrap();
    assert_eq!(disabled.status, UserStatus::Inactive);
    // Still present — disabled, not deleted.
    assert_eq!(repo.count().await.unwrap(), 1);
    assert_eq!(repo.count_active().await.unwrap(), 0);

    // Everything else is untouched.
    assert_eq!(disabled.username, user.username);
    assert_eq!(disabled.email, user.email);
    assert_eq!(disabled.role, user.role);
}

#[tokio::test]
async fn list_returns_all_users_oldest_first() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    for i in 0..3 {
        repo.create(CreateUser {
            username: format!("user-{i}"),
            email: format!("user-{i}@example.com"),
            password: "pass123".into(),
            role: Role::User,
        })
        .await
        .unwrap();
    }

    let users = repo.list().await.unwrap();
    assert_eq!(users.len(), 3);
    for window in users.windows(2) {
        assert!(window[0].created_at <= window[1].created_at);
    }
}

#[tokio::test]
async fn pepper_changes_the_hash_input() {
    let db = setup().await;
    let repo = SurrealUserRepository::with_pepper(db, "server-secret-pepper".into());

    let user = repo.create(alice()).await.unwrap();

    // Verify with pepper succeeds, without it fails.
    assert!(
        opsdeck_auth::password::verify_password(
            "SuperSecret123!",
            &user.password_hash,
            Some("server-secret-pepper"),
        )
        .unwrap()
    );
    assert!(
        !opsdeck_auth::password::verify_password("SuperSecret123!", &user.password_hash, None)
            .unwrap()
    );
}
