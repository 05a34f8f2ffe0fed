//! Integration tests for the startup bootstrap.

use opsdeck_core::models::user::{Role, UserStatus};
use opsdeck_core::repository::{SystemSettingsRepository, UserRepository};
use opsdeck_db::repository::{SurrealSystemSettingsRepository, SurrealUserRepository};
use opsdeck_db::{BootstrapConfig, run_bootstrap};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    opsdeck_db::run_migrations(&db).await.unwrap();
    db
}

#[tokio::test]
async fn cold_start_seeds_accounts_and_settings() {
    let db = setup().await;
    run_bootstrap(&db, &BootstrapConfig::default()).await.unwrap();

    let users = SurrealUserRepository::new(db.clone());
    let admin = users.get_by_username("admin").await.unwrap();
    assert_eq!(admin.role, Role::Admin);
    assert_eq!(admin.status, UserStatus::Active);

    let user = users.get_by_username("user").await.unwrap();
    assert_eq!(user.role, Role::User);

    let settings = SurrealSystemSettingsRepository::new(db);
    let current = settings.get().await.unwrap();
    assert_eq!(current.backup_frequency, "daily");
}

#[tokio::test]
async fn bootstrap_is_idempotent() {
    let db = setup().await;
    let config = BootstrapConfig::default();

    run_bootstrap(&db, &config).await.unwrap();
    run_bootstrap(&db, &config).await.unwrap();

    let users = SurrealUserRepository::new(db);
    assert_eq!(users.count().await.unwrap(), 2);
}

#[tokio::test]
async fn populated_table_is_left_untouched() {
    let db = setup().await;
    let users = SurrealUserRepository::new(db.clone());

    users
        .create(opsdeck_core::models::user::CreateUser {
            username: "existing".into(),
            email: "existing@example.com".into(),
            password: "pass123".into(),
            role: Role::Manager,
        })
        .await
        .unwrap();

    run_bootstrap(&db, &BootstrapConfig::default()).await.unwrap();

    // No seed accounts were added next to the existing one.
    assert_eq!(users.count().await.unwrap(), 1);
    assert!(users.get_by_username("admin").await.is_err());
}
