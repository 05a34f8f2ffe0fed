//! Router assembly.

use axum::Router;
use axum::routing::{get, post, put};

use crate::handlers::{alerts, auth, backups, health, logs, metrics, notifications, settings, users};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/detailed", get(health::health_detailed))
        .route("/login", post(auth::login))
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/{id}/status", put(users::set_user_status))
        .route("/alerts", get(alerts::list_alerts).post(alerts::create_alert))
        .route("/alerts/{id}", put(alerts::update_alert))
        .route("/alerts/{id}/toggle", put(alerts::toggle_alert))
        .route("/metrics/system", get(metrics::system_snapshot))
        .route("/metrics/history", get(metrics::history))
        .route(
            "/settings",
            get(settings::get_settings).put(settings::update_settings),
        )
        .route("/logs", get(logs::query_logs))
        .route(
            "/backups",
            get(backups::list_backups).post(backups::create_backup),
        )
        .route(
            "/notifications",
            get(notifications::get_notifications).put(notifications::update_notifications),
        )
        .with_state(state)
}
