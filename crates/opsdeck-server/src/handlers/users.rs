//! User management endpoints.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use opsdeck_auth::{Capability, authorize};
use opsdeck_core::error::OpsError;
use opsdeck_core::models::user::{CreateUser, Role, UserStatus, UserView};
use opsdeck_core::repository::UserRepository;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::extract::{ApiJson, AuthUser, parse_id};
use crate::state::AppState;

pub async fn list_users(
    State(state): State<AppState>,
    caller: AuthUser,
) -> ApiResult<Json<Vec<UserView>>> {
    authorize(caller.role, Capability::ViewConsole)?;

    let users = state.users().list().await?;
    Ok(Json(users.into_iter().map(UserView::from).collect()))
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    /// Defaults to `user` when absent.
    pub role: Option<String>,
}

pub async fn create_user(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserView>)> {
    authorize(caller.role, Capability::ManageUsers)?;

    let role = match req.role.as_deref() {
        None => Role::User,
        Some(raw) => Role::parse(raw).ok_or_else(|| {
            OpsError::invalid_field("role", "role must be one of admin, manager, user")
        })?,
    };

    // Field-level validation and the uniqueness check run inside the
    // repository, before anything is written.
    let created = state
        .users()
        .create(CreateUser {
            username: req.username.unwrap_or_default(),
            email: req.email.unwrap_or_default(),
            password: req.password.unwrap_or_default(),
            role,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

#[derive(Debug, Deserialize)]
pub struct SetUserStatusRequest {
    pub status: Option<String>,
}

pub async fn set_user_status(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<SetUserStatusRequest>,
) -> ApiResult<Json<UserView>> {
    authorize(caller.role, Capability::ManageUsers)?;

    let id = parse_id(&id)?;
    let status = req
        .status
        .as_deref()
        .and_then(UserStatus::parse)
        .ok_or_else(|| {
            OpsError::invalid_field("status", "status must be one of active, inactive")
        })?;

    let updated = state.users().set_status(id, status).await?;
    Ok(Json(updated.into()))
}
