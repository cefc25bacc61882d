// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Course management handlers. Writes are admin-only.

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
use crate::store::{CourseUpdate, NewCourse};

/// Create request body.
#[derive(Debug, Deserialize)]
pub struct CreateCourseRequest {
    /// Course name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Institutional course code.
    pub course_code: String,
    /// Name of the responsible teacher.
    pub teacher: String,
}

/// Update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateCourseRequest {
    /// New course name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New responsible teacher name.
    pub teacher: Option<String>,
}

/// GET /api/courses
pub async fn list_courses(
    State(state): State<AppState>,
    Auth(_ctx): Auth,
    Pagination(pagination): Pagination,
) -> ApiResult<impl IntoResponse> {
    let (courses, total) = pagination.slice(state.store().list_courses().await?);
    let meta = ResponseMeta::pagination(total, pagination.page, pagination.per_page);
    Ok(Json(ApiResponse::success(courses).with_meta(meta)))
}

/// GET /api/courses/{id}
pub async fn get_course(
    State(state): State<AppState>,
    Auth(_ctx): Auth,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let course = state
        .store()
        .get_course(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Course"))?;
    Ok(Json(ApiResponse::success(course)))
}

/// POST /api/courses
pub async fn create_course(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Json(request): Json<CreateCourseRequest>,
) -> ApiResult<impl IntoResponse> {
    require_role(&ctx, &[Role::Admin])?;
    require_field(&request.name, "name")?;
    require_field(&request.course_code, "course_code")?;
    require_field(&request.teacher, "teacher")?;

    let course = state
        .store()
        .create_course(NewCourse {
            name: request.name,
            description: request.description,
            course_code: request.course_code,
            teacher: request.teacher,
        })
        .await?;

    tracing::info!(id = course.id, "Course created");
    Ok(Json(ApiResponse::success(course)))
}

/// PUT /api/courses/{id}
pub async fn update_course(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Path(id): Path<i64>,
    Json(request): Json<UpdateCourseRequest>,
) -> ApiResult<impl IntoResponse> {
    require_role(&ctx, &[Role::Admin])?;

    let course = state
        .store()
        .update_course(
            id,
            CourseUpdate {
                name: request.name,
                description: request.description,
                teacher: request.teacher,
            },
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Course"))?;

    Ok(Json(ApiResponse::success(course)))
}

/// DELETE /api/courses/{id}
pub async fn delete_course(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    require_role(&ctx, &[Role::Admin])?;

    if !state.store().delete_course(id).await? {
        return Err(ApiError::not_found("Course"));
    }

    Ok(Json(ApiResponse::success(serde_json::json!({ "deleted": true }))))
}
