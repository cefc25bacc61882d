// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Submission handlers.
//!
//! Students create submissions for themselves; teachers grade and delete
//! them. A student listing submissions only ever sees their own.

use axum::{
    extract::{Path, Query, State},
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
use crate::store::{NewSubmission, SubmissionFilter, SubmissionUpdate};

/// List query parameters.
#[derive(Debug, Deserialize)]
pub struct SubmissionQuery {
    /// Restrict to a student name.
    pub student: Option<String>,
    /// Restrict to an assignment title.
    pub assignment: Option<String>,
}

/// Create request body.
#[derive(Debug, Deserialize)]
pub struct CreateSubmissionRequest {
    /// Title of the assignment being answered.
    pub assignment: String,
    /// Submitted answer text.
    pub submission_text: String,
}

/// Update request body (grading).
#[derive(Debug, Deserialize)]
pub struct UpdateSubmissionRequest {
    /// Corrected answer text.
    pub submission_text: Option<String>,
    /// Awarded marks.
    pub marks_obtained: Option<u32>,
    /// Grading feedback.
    pub feedback: Option<String>,
}

/// GET /api/submissions
pub async fn list_submissions(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Pagination(pagination): Pagination,
    Query(query): Query<SubmissionQuery>,
) -> ApiResult<impl IntoResponse> {
    let mut filter = SubmissionFilter {
        student: query.student,
        assignment: query.assignment,
    };

    // Students only see their own submissions, whatever they asked for.
    if ctx.has_role(Role::Student) {
        filter.student = ctx.name.clone();
    }

    let (submissions, total) = pagination.slice(state.store().list_submissions(filter).await?);
    let meta = ResponseMeta::pagination(total, pagination.page, pagination.per_page);
    Ok(Json(ApiResponse::success(submissions).with_meta(meta)))
}

/// POST /api/submissions
pub async fn create_submission(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Json(request): Json<CreateSubmissionRequest>,
) -> ApiResult<impl IntoResponse> {
    require_role(&ctx, &[Role::Student])?;
    require_field(&request.assignment, "assignment")?;
    require_field(&request.submission_text, "submission_text")?;

    // The submitting student is the caller; the name travels in the token.
    let student = ctx
        .name
        .clone()
        .ok_or_else(|| ApiError::validation("Token carries no student name"))?;

    let submission = state
        .store()
        .create_submission(NewSubmission {
            assignment: request.assignment,
            student,
            submission_text: request.submission_text,
        })
        .await?;

    tracing::info!(id = submission.id, "Submission received");
    Ok(Json(ApiResponse::success(submission)))
}

/// PUT /api/submissions/{id}
pub async fn update_submission(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Path(id): Path<i64>,
    Json(request): Json<UpdateSubmissionRequest>,
) -> ApiResult<impl IntoResponse> {
    require_role(&ctx, &[Role::Teacher])?;

    let submission = state
        .store()
        .update_submission(
            id,
            SubmissionUpdate {
                submission_text: request.submission_text,
                marks_obtained: request.marks_obtained,
                feedback: request.feedback,
            },
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Submission"))?;

    Ok(Json(ApiResponse::success(submission)))
}

/// DELETE /api/submissions/{id}
pub async fn delete_submission(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    require_role(&ctx, &[Role::Teacher])?;

    if !state.store().delete_submission(id).await? {
        return Err(ApiError::not_found("Submission"));
    }

    Ok(Json(ApiResponse::success(serde_json::json!({ "deleted": true }))))
}
