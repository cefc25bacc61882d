// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Assignment handlers. Writes are teacher-only.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use slate_core::Role;

use super::{require_field, require_role};
use crate::error::{ApiError, ApiResult};
use crate::extractors::{Auth, Pagination};
use crate::response::{ApiResponse, ResponseMeta};
use crate::state::AppState;
use crate::store::{AssignmentUpdate, NewAssignment};

/// Create request body.
#[derive(Debug, Deserialize)]
pub struct CreateAssignmentRequest {
    /// Assignment title.
    pub title: String,
    /// Task description.
    #[serde(default)]
    pub description: String,
    /// Submission deadline.
    pub due_date: NaiveDate,
    /// Name of the subject; the owning teacher is derived from it.
    pub subject: String,
    /// Maximum attainable marks.
    pub total_marks: u32,
}

/// Update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateAssignmentRequest {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New deadline.
    pub due_date: Option<NaiveDate>,
    /// New subject name.
    pub subject: Option<String>,
    /// New maximum marks.
    pub total_marks: Option<u32>,
}

/// GET /api/assignments
pub async fn list_assignments(
    State(state): State<AppState>,
    Auth(_ctx): Auth,
    Pagination(pagination): Pagination,
) -> ApiResult<impl IntoResponse> {
    let (assignments, total) = pagination.slice(state.store().list_assignments().await?);
    let meta = ResponseMeta::pagination(total, pagination.page, pagination.per_page);
    Ok(Json(ApiResponse::success(assignments).with_meta(meta)))
}

/// GET /api/assignments/{id}
pub async fn get_assignment(
    State(state): State<AppState>,
    Auth(_ctx): Auth,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let assignment = state
        .store()
        .get_assignment(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Assignment"))?;
    Ok(Json(ApiResponse::success(assignment)))
}

/// POST /api/assignments
pub async fn create_assignment(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Json(request): Json<CreateAssignmentRequest>,
) -> ApiResult<impl IntoResponse> {
    require_role(&ctx, &[Role::Teacher])?;
    require_field(&request.title, "title")?;
    require_field(&request.subject, "subject")?;
    if request.total_marks == 0 {
        return Err(ApiError::validation("total_marks must be greater than 0"));
    }

    let assignment = state
        .store()
        .create_assignment(NewAssignment {
            title: request.title,
            description: request.description,
            due_date: request.due_date,
            subject: request.subject,
            total_marks: request.total_marks,
        })
        .await?;

    tracing::info!(id = assignment.id, "Assignment created");
    Ok(Json(ApiResponse::success(assignment)))
}

/// PUT /api/assignments/{id}
pub async fn update_assignment(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Path(id): Path<i64>,
    Json(request): Json<UpdateAssignmentRequest>,
) -> ApiResult<impl IntoResponse> {
    require_role(&ctx, &[Role::Teacher])?;

    let assignment = state
        .store()
        .update_assignment(
            id,
            AssignmentUpdate {
                title: request.title,
                description: request.description,
                due_date: request.due_date,
                subject: request.subject,
                total_marks: request.total_marks,
            },
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Assignment"))?;

    Ok(Json(ApiResponse::success(assignment)))
}

/// DELETE /api/assignments/{id}
pub async fn delete_assignment(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    require_role(&ctx, &[Role::Teacher])?;

    if !state.store().delete_assignment(id).await? {
        return Err(ApiError::not_found("Assignment"));
    }

    Ok(Json(ApiResponse::success(serde_json::json!({ "deleted": true }))))
}
