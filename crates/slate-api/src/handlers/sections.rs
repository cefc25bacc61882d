// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Section management handlers. Writes are admin-only.

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
use crate::store::{NewSection, SectionUpdate};

/// Create request body.
#[derive(Debug, Deserialize)]
pub struct CreateSectionRequest {
    /// Section name.
    pub name: String,
    /// Name of the leading teacher.
    pub teacher: String,
}

/// Update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateSectionRequest {
    /// New section name.
    pub name: Option<String>,
    /// New leading teacher name.
    pub teacher: Option<String>,
}

/// GET /api/sections
pub async fn list_sections(
    State(state): State<AppState>,
    Auth(_ctx): Auth,
    Pagination(pagination): Pagination,
) -> ApiResult<impl IntoResponse> {
    let (sections, total) = pagination.slice(state.store().list_sections().await?);
    let meta = ResponseMeta::pagination(total, pagination.page, pagination.per_page);
    Ok(Json(ApiResponse::success(sections).with_meta(meta)))
}

/// GET /api/sections/{id}
pub async fn get_section(
    State(state): State<AppState>,
    Auth(_ctx): Auth,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let section = state
        .store()
        .get_section(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Section"))?;
    Ok(Json(ApiResponse::success(section)))
}

/// POST /api/sections
pub async fn create_section(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Json(request): Json<CreateSectionRequest>,
) -> ApiResult<impl IntoResponse> {
    require_role(&ctx, &[Role::Admin])?;
    require_field(&request.name, "name")?;
    require_field(&request.teacher, "teacher")?;

    let section = state
        .store()
        .create_section(NewSection {
            name: request.name,
            teacher: request.teacher,
        })
        .await?;

    tracing::info!(id = section.id, "Section created");
    Ok(Json(ApiResponse::success(section)))
}

/// PUT /api/sections/{id}
pub async fn update_section(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Path(id): Path<i64>,
    Json(request): Json<UpdateSectionRequest>,
) -> ApiResult<impl IntoResponse> {
    require_role(&ctx, &[Role::Admin])?;

    let section = state
        .store()
        .update_section(
            id,
            SectionUpdate {
                name: request.name,
                teacher: request.teacher,
            },
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Section"))?;

    Ok(Json(ApiResponse::success(section)))
}

/// DELETE /api/sections/{id}
pub async fn delete_section(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    require_role(&ctx, &[Role::Admin])?;

    if !state.store().delete_section(id).await? {
        return Err(ApiError::not_found("Section"));
    }

    Ok(Json(ApiResponse::success(serde_json::json!({ "deleted": true }))))
}
