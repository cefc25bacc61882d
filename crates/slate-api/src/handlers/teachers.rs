// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Teacher management handlers. Writes are admin-only.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use slate_core::Role;

use super::{require_field, require_role};
use crate::auth::password;
use crate::error::{ApiError, ApiResult};
use crate::extractors::{Auth, Pagination};
use crate::response::{ApiResponse, ResponseMeta};
use crate::state::AppState;
use crate::store::{NewTeacher, TeacherUpdate};

/// Create request body.
#[derive(Debug, Deserialize)]
pub struct CreateTeacherRequest {
    /// Display name.
    pub name: String,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Initial password.
    pub password: String,
}

/// Update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateTeacherRequest {
    /// New display name.
    pub name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New password.
    pub password: Option<String>,
}

/// GET /api/teachers
pub async fn list_teachers(
    State(state): State<AppState>,
    Auth(_ctx): Auth,
    Pagination(pagination): Pagination,
) -> ApiResult<impl IntoResponse> {
    let (teachers, total) = pagination.slice(state.store().list_teachers().await?);
    let meta = ResponseMeta::pagination(total, pagination.page, pagination.per_page);
    Ok(Json(ApiResponse::success(teachers).with_meta(meta)))
}

/// GET /api/teachers/{id}
pub async fn get_teacher(
    State(state): State<AppState>,
    Auth(_ctx): Auth,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let teacher = state
        .store()
        .get_teacher(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Teacher"))?;
    Ok(Json(ApiResponse::success(teacher)))
}

/// POST /api/teachers
pub async fn create_teacher(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Json(request): Json<CreateTeacherRequest>,
) -> ApiResult<impl IntoResponse> {
    require_role(&ctx, &[Role::Admin])?;
    require_field(&request.name, "name")?;
    require_field(&request.username, "username")?;
    require_field(&request.email, "email")?;
    require_field(&request.password, "password")?;

    let teacher = state
        .store()
        .create_teacher(NewTeacher {
            name: request.name,
            username: request.username,
            email: request.email,
            password_hash: password::hash_password(&request.password)?,
        })
        .await?;

    tracing::info!(id = teacher.id, "Teacher created");
    Ok(Json(ApiResponse::success(teacher)))
}

/// PUT /api/teachers/{id}
pub async fn update_teacher(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Path(id): Path<i64>,
    Json(request): Json<UpdateTeacherRequest>,
) -> ApiResult<impl IntoResponse> {
    require_role(&ctx, &[Role::Admin])?;

    let password_hash = request
        .password
        .as_deref()
        .map(password::hash_password)
        .transpose()?;

    let teacher = state
        .store()
        .update_teacher(
            id,
            TeacherUpdate {
                name: request.name,
                email: request.email,
                password_hash,
            },
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Teacher"))?;

    Ok(Json(ApiResponse::success(teacher)))
}

/// DELETE /api/teachers/{id}
pub async fn delete_teacher(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    require_role(&ctx, &[Role::Admin])?;

    if !state.store().delete_teacher(id).await? {
        return Err(ApiError::not_found("Teacher"));
    }

    tracing::info!(id, "Teacher deleted");
    Ok(Json(ApiResponse::success(serde_json::json!({ "deleted": true }))))
}
