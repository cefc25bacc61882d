// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Subject management handlers. Writes are admin-only.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use slate_core::Role;

use super::{require_field, require_role};
use crate::error::{ApiError, ApiResult};
use crate::extractors::{Auth, Pagination};
use crate::response::{ApiResponse, ResponseMeta};
use crate::state::AppState;
use crate::store::{NewSubject, SubjectUpdate};

/// Create request body.
#[derive(Debug, Deserialize)]
pub struct CreateSubjectRequest {
    /// Subject name.
    pub name: String,
    /// Name of the assigned teacher.
    pub teacher: String,
    /// Name of the parent course.
    pub course: String,
}

/// Update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateSubjectRequest {
    /// New subject name.
    pub name: Option<String>,
    /// New assigned teacher name.
    pub teacher: Option<String>,
    /// New parent course name.
    pub course: Option<String>,
}

/// GET /api/subjects
pub async fn list_subjects(
    State(state): State<AppState>,
    Auth(_ctx): Auth,
    Pagination(pagination): Pagination,
) -> ApiResult<impl IntoResponse> {
    let (subjects, total) = pagination.slice(state.store().list_subjects().await?);
    let meta = ResponseMeta::pagination(total, pagination.page, pagination.per_page);
    Ok(Json(ApiResponse::success(subjects).with_meta(meta)))
}

/// GET /api/subjects/{id}
pub async fn get_subject(
    State(state): State<AppState>,
    Auth(_ctx): Auth,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let subject = state
        .store()
        .get_subject(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Subject"))?;
    Ok(Json(ApiResponse::success(subject)))
}

/// POST /api/subjects
pub async fn create_subject(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Json(request): Json<CreateSubjectRequest>,
) -> ApiResult<impl IntoResponse> {
    require_role(&ctx, &[Role::Admin])?;
    require_field(&request.name, "name")?;
    require_field(&request.teacher, "teacher")?;
    require_field(&request.course, "course")?;

    let subject = state
        .store()
        .create_subject(NewSubject {
            name: request.name,
            teacher: request.teacher,
            course: request.course,
        })
        .await?;

    tracing::info!(id = subject.id, "Subject created");
    Ok(Json(ApiResponse::success(subject)))
}

/// PUT /api/subjects/{id}
pub async fn update_subject(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Path(id): Path<i64>,
    Json(request): Json<UpdateSubjectRequest>,
) -> ApiResult<impl IntoResponse> {
    require_role(&ctx, &[Role::Admin])?;

    let subject = state
        .store()
        .update_subject(
            id,
            SubjectUpdate {
                name: request.name,
                teacher: request.teacher,
                course: request.course,
            },
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Subject"))?;

    Ok(Json(ApiResponse::success(subject)))
}

/// DELETE /api/subjects/{id}
pub async fn delete_subject(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    require_role(&ctx, &[Role::Admin])?;

    if !state.store().delete_subject(id).await? {
        return Err(ApiError::not_found("Subject"));
    }

    Ok(Json(ApiResponse::success(serde_json::json!({ "deleted": true }))))
}
