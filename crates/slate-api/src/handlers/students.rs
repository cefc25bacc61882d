// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Student management handlers. Writes are admin-only.

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
use crate::store::{NewStudent, StudentUpdate};

/// Create request body.
#[derive(Debug, Deserialize)]
pub struct CreateStudentRequest {
    /// Display name.
    pub name: String,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Initial password.
    pub password: String,
    /// Name of the section the student joins.
    pub section: String,
}

/// Update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateStudentRequest {
    /// New display name.
    pub name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New section name.
    pub section: Option<String>,
    /// New password.
    pub password: Option<String>,
}

/// GET /api/students
pub async fn list_students(
    State(state): State<AppState>,
    Auth(_ctx): Auth,
    Pagination(pagination): Pagination,
) -> ApiResult<impl IntoResponse> {
    let (students, total) = pagination.slice(state.store().list_students().await?);
    let meta = ResponseMeta::pagination(total, pagination.page, pagination.per_page);
    Ok(Json(ApiResponse::success(students).with_meta(meta)))
}

/// GET /api/students/{id}
pub async fn get_student(
    State(state): State<AppState>,
    Auth(_ctx): Auth,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let student = state
        .store()
        .get_student(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Student"))?;
    Ok(Json(ApiResponse::success(student)))
}

/// POST /api/students
pub async fn create_student(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Json(request): Json<CreateStudentRequest>,
) -> ApiResult<impl IntoResponse> {
    require_role(&ctx, &[Role::Admin])?;
    require_field(&request.name, "name")?;
    require_field(&request.username, "username")?;
    require_field(&request.email, "email")?;
    require_field(&request.password, "password")?;
    require_field(&request.section, "section")?;

    let student = state
        .store()
        .create_student(NewStudent {
            name: request.name,
            username: request.username,
            email: request.email,
            password_hash: password::hash_password(&request.password)?,
            section: request.section,
        })
        .await?;

    tracing::info!(id = student.id, "Student created");
    Ok(Json(ApiResponse::success(student)))
}

/// PUT /api/students/{id}
pub async fn update_student(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Path(id): Path<i64>,
    Json(request): Json<UpdateStudentRequest>,
) -> ApiResult<impl IntoResponse> {
    require_role(&ctx, &[Role::Admin])?;

    let password_hash = request
        .password
        .as_deref()
        .map(password::hash_password)
        .transpose()?;

    let student = state
        .store()
        .update_student(
            id,
            StudentUpdate {
                name: request.name,
                email: request.email,
                section: request.section,
                password_hash,
            },
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Student"))?;

    Ok(Json(ApiResponse::success(student)))
}

/// DELETE /api/students/{id}
pub async fn delete_student(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    require_role(&ctx, &[Role::Admin])?;

    if !state.store().delete_student(id).await? {
        return Err(ApiError::not_found("Student"));
    }

    tracing::info!(id, "Student deleted");
    Ok(Json(ApiResponse::success(serde_json::json!({ "deleted": true }))))
}
