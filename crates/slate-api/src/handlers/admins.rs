// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Admin directory handlers.
//!
//! The whole group is nested under `RoleLayer::allow(Role::Admin)` in the
//! router; only admins reach these.

use axum::{extract::State, response::IntoResponse, Json};
use serde::Deserialize;

use super::require_field;
use crate::auth::password;
use crate::error::ApiResult;
use crate::extractors::{Auth, Pagination};
use crate::response::{ApiResponse, ResponseMeta};
use crate::state::AppState;
use crate::store::NewAdmin;

/// Create request body.
#[derive(Debug, Deserialize)]
pub struct CreateAdminRequest {
    /// Display name.
    pub name: String,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Initial password.
    pub password: String,
}

/// GET /api/admins
pub async fn list_admins(
    State(state): State<AppState>,
    Auth(_ctx): Auth,
    Pagination(pagination): Pagination,
) -> ApiResult<impl IntoResponse> {
    let (admins, total) = pagination.slice(state.store().list_admins().await?);
    let meta = ResponseMeta::pagination(total, pagination.page, pagination.per_page);
    Ok(Json(ApiResponse::success(admins).with_meta(meta)))
}

/// POST /api/admins
pub async fn create_admin(
    State(state): State<AppState>,
    Auth(_ctx): Auth,
    Json(request): Json<CreateAdminRequest>,
) -> ApiResult<impl IntoResponse> {
    require_field(&request.name, "name")?;
    require_field(&request.username, "username")?;
    require_field(&request.email, "email")?;
    require_field(&request.password, "password")?;

    let admin = state
        .store()
        .create_admin(NewAdmin {
            name: request.name,
            username: request.username,
            email: request.email,
            password_hash: password::hash_password(&request.password)?,
        })
        .await?;

    tracing::info!(id = admin.id, "Admin created");
    Ok(Json(ApiResponse::success(admin)))
}
