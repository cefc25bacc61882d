// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Attendance handlers. Writes are teacher-only.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use slate_core::{AttendanceStatus, Role};

use super::{require_field, require_role};
use crate::error::{ApiError, ApiResult};
use crate::extractors::{Auth, Pagination};
use crate::response::{ApiResponse, ResponseMeta};
use crate::state::AppState;
use crate::store::{AttendanceFilter, AttendanceUpdate, NewAttendance};

/// List query parameters.
#[derive(Debug, Deserialize)]
pub struct AttendanceQuery {
    /// Restrict to a student name.
    pub student: Option<String>,
    /// Restrict to a subject name.
    pub subject: Option<String>,
}

/// Create request body.
#[derive(Debug, Deserialize)]
pub struct CreateAttendanceRequest {
    /// Name of the observed student.
    pub student: String,
    /// Name of the subject.
    pub subject: String,
    /// Observed status.
    pub status: AttendanceStatus,
}

/// Update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateAttendanceRequest {
    /// New status.
    pub status: Option<AttendanceStatus>,
    /// New student name.
    pub student: Option<String>,
    /// New subject name.
    pub subject: Option<String>,
}

/// GET /api/attendance
pub async fn list_attendance(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Pagination(pagination): Pagination,
    Query(query): Query<AttendanceQuery>,
) -> ApiResult<impl IntoResponse> {
    let mut filter = AttendanceFilter {
        student: query.student,
        subject: query.subject,
    };

    // Students only see their own attendance.
    if ctx.has_role(Role::Student) {
        filter.student = ctx.name.clone();
    }

    let (records, total) = pagination.slice(state.store().list_attendance(filter).await?);
    let meta = ResponseMeta::pagination(total, pagination.page, pagination.per_page);
    Ok(Json(ApiResponse::success(records).with_meta(meta)))
}

/// POST /api/attendance
pub async fn create_attendance(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Json(request): Json<CreateAttendanceRequest>,
) -> ApiResult<impl IntoResponse> {
    require_role(&ctx, &[Role::Teacher])?;
    require_field(&request.student, "student")?;
    require_field(&request.subject, "subject")?;

    let record = state
        .store()
        .create_attendance(NewAttendance {
            student: request.student,
            subject: request.subject,
            status: request.status,
        })
        .await?;

    tracing::info!(id = record.id, status = %record.status, "Attendance marked");
    Ok(Json(ApiResponse::success(record)))
}

/// PUT /api/attendance/{id}
pub async fn update_attendance(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Path(id): Path<i64>,
    Json(request): Json<UpdateAttendanceRequest>,
) -> ApiResult<impl IntoResponse> {
    require_role(&ctx, &[Role::Teacher])?;

    let record = state
        .store()
        .update_attendance(
            id,
            AttendanceUpdate {
                status: request.status,
                student: request.student,
                subject: request.subject,
            },
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Attendance record"))?;

    Ok(Json(ApiResponse::success(record)))
}

/// DELETE /api/attendance/{id}
pub async fn delete_attendance(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    require_role(&ctx, &[Role::Teacher])?;

    if !state.store().delete_attendance(id).await? {
        return Err(ApiError::not_found("Attendance record"));
    }

    Ok(Json(ApiResponse::success(serde_json::json!({ "deleted": true }))))
}
