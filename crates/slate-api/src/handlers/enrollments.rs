// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Enrollment handlers. Writes are admin-only.

use axum::{
    extract::{Path, Query, State},
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
use crate::store::{EnrollmentFilter, EnrollmentUpdate, NewEnrollment};

/// List query parameters.
#[derive(Debug, Deserialize)]
pub struct EnrollmentQuery {
    /// Restrict to a course name.
    pub course: Option<String>,
    /// Restrict to a student name.
    pub student: Option<String>,
}

/// Create request body.
#[derive(Debug, Deserialize)]
pub struct CreateEnrollmentRequest {
    /// Name of the student.
    pub student: String,
    /// Name of the course.
    pub course: String,
    /// Date of enrollment.
    pub enrollment_date: NaiveDate,
    /// Initial status.
    #[serde(default = "default_status")]
    pub status: String,
    /// Initial grade.
    #[serde(default)]
    pub grade: String,
}

fn default_status() -> String {
    "active".to_string()
}

/// Update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateEnrollmentRequest {
    /// New status.
    pub status: Option<String>,
    /// New grade.
    pub grade: Option<String>,
}

/// GET /api/enrollments
pub async fn list_enrollments(
    State(state): State<AppState>,
    Auth(_ctx): Auth,
    Pagination(pagination): Pagination,
    Query(query): Query<EnrollmentQuery>,
) -> ApiResult<impl IntoResponse> {
    let filter = EnrollmentFilter {
        course: query.course,
        student: query.student,
    };
    let (enrollments, total) = pagination.slice(state.store().list_enrollments(filter).await?);
    let meta = ResponseMeta::pagination(total, pagination.page, pagination.per_page);
    Ok(Json(ApiResponse::success(enrollments).with_meta(meta)))
}

/// POST /api/enrollments
pub async fn create_enrollment(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Json(request): Json<CreateEnrollmentRequest>,
) -> ApiResult<impl IntoResponse> {
    require_role(&ctx, &[Role::Admin])?;
    require_field(&request.student, "student")?;
    require_field(&request.course, "course")?;

    let enrollment = state
        .store()
        .create_enrollment(NewEnrollment {
            student: request.student,
            course: request.course,
            enrollment_date: request.enrollment_date,
            status: request.status,
            grade: request.grade,
        })
        .await?;

    tracing::info!(id = enrollment.id, "Enrollment created");
    Ok(Json(ApiResponse::success(enrollment)))
}

/// PUT /api/enrollments/{id}
pub async fn update_enrollment(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Path(id): Path<i64>,
    Json(request): Json<UpdateEnrollmentRequest>,
) -> ApiResult<impl IntoResponse> {
    require_role(&ctx, &[Role::Admin])?;

    let enrollment = state
        .store()
        .update_enrollment(
            id,
            EnrollmentUpdate {
                status: request.status,
                grade: request.grade,
            },
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Enrollment"))?;

    Ok(Json(ApiResponse::success(enrollment)))
}

/// DELETE /api/enrollments/{id}
pub async fn delete_enrollment(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    require_role(&ctx, &[Role::Admin])?;

    if !state.store().delete_enrollment(id).await? {
        return Err(ApiError::not_found("Enrollment"));
    }

    Ok(Json(ApiResponse::success(serde_json::json!({ "deleted": true }))))
}
