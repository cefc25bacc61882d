// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Announcement handlers. Writes are teacher-only; the posting teacher is
//! the caller.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use slate_core::{Audience, Role};

use super::{require_field, require_role};
use crate::error::{ApiError, ApiResult};
use crate::extractors::{Auth, Pagination};
use crate::response::{ApiResponse, ResponseMeta};
use crate::state::AppState;
use crate::store::{AnnouncementUpdate, NewAnnouncement};

/// Create request body.
#[derive(Debug, Deserialize)]
pub struct CreateAnnouncementRequest {
    /// Title.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Target audience.
    #[serde(default = "default_audience")]
    pub target_audience: Audience,
    /// Name of the target section.
    pub section: String,
}

fn default_audience() -> Audience {
    Audience::All
}

/// Update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateAnnouncementRequest {
    /// New title.
    pub title: Option<String>,
    /// New body text.
    pub content: Option<String>,
    /// New target section name.
    pub section: Option<String>,
}

/// GET /api/announcements
pub async fn list_announcements(
    State(state): State<AppState>,
    Auth(_ctx): Auth,
    Pagination(pagination): Pagination,
) -> ApiResult<impl IntoResponse> {
    let (announcements, total) = pagination.slice(state.store().list_announcements().await?);
    let meta = ResponseMeta::pagination(total, pagination.page, pagination.per_page);
    Ok(Json(ApiResponse::success(announcements).with_meta(meta)))
}

/// GET /api/announcements/{id}
pub async fn get_announcement(
    State(state): State<AppState>,
    Auth(_ctx): Auth,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let announcement = state
        .store()
        .get_announcement(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Announcement"))?;
    Ok(Json(ApiResponse::success(announcement)))
}

/// POST /api/announcements
pub async fn create_announcement(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Json(request): Json<CreateAnnouncementRequest>,
) -> ApiResult<impl IntoResponse> {
    require_role(&ctx, &[Role::Teacher])?;
    require_field(&request.title, "title")?;
    require_field(&request.content, "content")?;
    require_field(&request.section, "section")?;

    let teacher = ctx
        .name
        .clone()
        .ok_or_else(|| ApiError::validation("Token carries no teacher name"))?;

    let announcement = state
        .store()
        .create_announcement(NewAnnouncement {
            title: request.title,
            content: request.content,
            target_audience: request.target_audience,
            section: request.section,
            teacher,
        })
        .await?;

    tracing::info!(id = announcement.id, "Announcement posted");
    Ok(Json(ApiResponse::success(announcement)))
}

/// PUT /api/announcements/{id}
pub async fn update_announcement(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Path(id): Path<i64>,
    Json(request): Json<UpdateAnnouncementRequest>,
) -> ApiResult<impl IntoResponse> {
    require_role(&ctx, &[Role::Teacher])?;

    let announcement = state
        .store()
        .update_announcement(
            id,
            AnnouncementUpdate {
                title: request.title,
                content: request.content,
                section: request.section,
            },
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Announcement"))?;

    Ok(Json(ApiResponse::success(announcement)))
}

/// DELETE /api/announcements/{id}
pub async fn delete_announcement(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    require_role(&ctx, &[Role::Teacher])?;

    if !state.store().delete_announcement(id).await? {
        return Err(ApiError::not_found("Announcement"));
    }

    Ok(Json(ApiResponse::success(serde_json::json!({ "deleted": true }))))
}
