// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Exam result handlers. Writes are teacher-only.

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
use crate::store::{NewResult, ResultUpdate};

/// Create request body.
#[derive(Debug, Deserialize)]
pub struct CreateResultRequest {
    /// Name of the examined student.
    pub student: String,
    /// Name of the subject.
    pub subject: String,
    /// Maximum attainable marks.
    pub total_marks: u32,
    /// Marks obtained.
    pub obtained_marks: u32,
    /// Exam category (e.g. "midterm", "final").
    pub exam_type: String,
    /// Examiner remarks.
    #[serde(default)]
    pub remarks: String,
}

/// Update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateResultRequest {
    /// New obtained marks.
    pub obtained_marks: Option<u32>,
    /// New remarks.
    pub remarks: Option<String>,
}

/// GET /api/results
pub async fn list_results(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Pagination(pagination): Pagination,
) -> ApiResult<impl IntoResponse> {
    let mut results = state.store().list_results().await?;

    // Students only see their own results.
    if ctx.has_role(Role::Student) {
        let name = ctx.name.clone().unwrap_or_default();
        results.retain(|r| r.student == name);
    }

    let (results, total) = pagination.slice(results);
    let meta = ResponseMeta::pagination(total, pagination.page, pagination.per_page);
    Ok(Json(ApiResponse::success(results).with_meta(meta)))
}

/// GET /api/results/{id}
pub async fn get_result(
    State(state): State<AppState>,
    Auth(_ctx): Auth,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let result = state
        .store()
        .get_result(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Result"))?;
    Ok(Json(ApiResponse::success(result)))
}

/// POST /api/results
pub async fn create_result(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Json(request): Json<CreateResultRequest>,
) -> ApiResult<impl IntoResponse> {
    require_role(&ctx, &[Role::Teacher])?;
    require_field(&request.student, "student")?;
    require_field(&request.subject, "subject")?;
    require_field(&request.exam_type, "exam_type")?;
    if request.obtained_marks > request.total_marks {
        return Err(ApiError::validation(
            "obtained_marks cannot exceed total_marks",
        ));
    }

    let result = state
        .store()
        .create_result(NewResult {
            student: request.student,
            subject: request.subject,
            total_marks: request.total_marks,
            obtained_marks: request.obtained_marks,
            exam_type: request.exam_type,
            remarks: request.remarks,
        })
        .await?;

    tracing::info!(id = result.id, "Result recorded");
    Ok(Json(ApiResponse::success(result)))
}

/// PUT /api/results/{id}
pub async fn update_result(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Path(id): Path<i64>,
    Json(request): Json<UpdateResultRequest>,
) -> ApiResult<impl IntoResponse> {
    require_role(&ctx, &[Role::Teacher])?;

    let result = state
        .store()
        .update_result(
            id,
            ResultUpdate {
                obtained_marks: request.obtained_marks,
                remarks: request.remarks,
            },
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Result"))?;

    Ok(Json(ApiResponse::success(result)))
}

/// DELETE /api/results/{id}
pub async fn delete_result(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    require_role(&ctx, &[Role::Teacher])?;

    if !state.store().delete_result(id).await? {
        return Err(ApiError::not_found("Result"));
    }

    Ok(Json(ApiResponse::success(serde_json::json!({ "deleted": true }))))
}
