//! Login endpoint.

use axum::Json;
use axum::extract::State;
use opsdeck_auth::service::LoginInput;
use opsdeck_core::error::{FieldError, OpsError};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: u64,
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let mut errors = Vec::new();
    if !matches!(&req.username, Some(u) if !u.trim().is_empty()) {
        errors.push(FieldError::new("username", "username is required"));
    }
    if !matches!(&req.password, Some(p) if !p.is_empty()) {
        errors.push(FieldError::new("password", "password is required"));
    }
    if !errors.is_empty() {
        return Err(OpsError::Validation { errors }.into());
    }

    let output = state
        .auth_service()
        .login(LoginInput {
            username: req.username.unwrap_or_default(),
            password: req.password.unwrap_or_default(),
        })
        .await?;

    Ok(Json(LoginResponse {
        token: output.token,
        expires_in: output.expires_in,
    }))
}
