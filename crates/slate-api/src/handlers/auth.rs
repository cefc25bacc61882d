// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Authentication handlers.

use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use slate_core::Role;

use crate::auth::{password, Claims};
use crate::error::{ApiError, ApiResult};
use crate::extractors::Auth;
use crate::response::AuthResponse;
use crate::state::AppState;

// =============================================================================
// Login
// =============================================================================

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
}

/// POST /api/login
///
/// Authenticates a user by email and returns a JWT carrying the role claim
/// and the profile fields clients derive the user from.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(ApiError::bad_request("email and password required"));
    }

    let account = state
        .store()
        .find_account_by_email(&request.email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid email"))?;

    if !password::verify_password(&request.password, &account.password_hash)? {
        return Err(ApiError::unauthorized("Invalid password"));
    }

    let claims = Claims::new(account.id, account.role, state.jwt().expiration_secs())
        .with_name(&account.name)
        .with_username(&account.username)
        .with_email(&account.email);
    let token = state.jwt().create_access_token(claims)?;

    tracing::info!(user_id = account.id, role = %account.role, "User logged in");

    Ok(Json(AuthResponse::new(token, state.jwt().expiration_secs())))
}

// =============================================================================
// Current User
// =============================================================================

/// Current user response.
#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    /// User ID.
    pub user_id: String,
    /// Platform role.
    pub role: Option<Role>,
    /// User's display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// User's login name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// User's email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// GET /api/me
///
/// Returns information about the currently authenticated user.
pub async fn current_user(Auth(ctx): Auth) -> ApiResult<impl IntoResponse> {
    Ok(Json(CurrentUserResponse {
        user_id: ctx.user_id,
        role: ctx.role,
        name: ctx.name,
        username: ctx.username,
        email: ctx.email,
    }))
}
