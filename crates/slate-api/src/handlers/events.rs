// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Event handlers. Writes are admin-only; the scheduling admin is the
//! caller.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use slate_core::Role;

use super::{require_field, require_role};
use crate::error::{ApiError, ApiResult};
use crate::extractors::{Auth, Pagination};
use crate::response::{ApiResponse, ResponseMeta};
use crate::state::AppState;
use crate::store::{EventUpdate, NewEvent};

/// Create request body.
#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    /// Title.
    pub title: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Date of the event.
    pub event_date: NaiveDate,
    /// Start time of the event.
    pub event_time: NaiveTime,
}

/// Update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateEventRequest {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New date.
    pub event_date: Option<NaiveDate>,
    /// New start time.
    pub event_time: Option<NaiveTime>,
}

/// GET /api/events
pub async fn list_events(
    State(state): State<AppState>,
    Auth(_ctx): Auth,
    Pagination(pagination): Pagination,
) -> ApiResult<impl IntoResponse> {
    let (events, total) = pagination.slice(state.store().list_events().await?);
    let meta = ResponseMeta::pagination(total, pagination.page, pagination.per_page);
    Ok(Json(ApiResponse::success(events).with_meta(meta)))
}

/// GET /api/events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    Auth(_ctx): Auth,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let event = state
        .store()
        .get_event(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Event"))?;
    Ok(Json(ApiResponse::success(event)))
}

/// POST /api/events
pub async fn create_event(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Json(request): Json<CreateEventRequest>,
) -> ApiResult<impl IntoResponse> {
    require_role(&ctx, &[Role::Admin])?;
    require_field(&request.title, "title")?;

    let admin = ctx
        .name
        .clone()
        .ok_or_else(|| ApiError::validation("Token carries no admin name"))?;

    let event = state
        .store()
        .create_event(NewEvent {
            title: request.title,
            description: request.description,
            event_date: request.event_date,
            event_time: request.event_time,
            admin,
        })
        .await?;

    tracing::info!(id = event.id, "Event scheduled");
    Ok(Json(ApiResponse::success(event)))
}

/// PUT /api/events/{id}
pub async fn update_event(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Path(id): Path<i64>,
    Json(request): Json<UpdateEventRequest>,
) -> ApiResult<impl IntoResponse> {
    require_role(&ctx, &[Role::Admin])?;

    let event = state
        .store()
        .update_event(
            id,
            EventUpdate {
                title: request.title,
                description: request.description,
                event_date: request.event_date,
                event_time: request.event_time,
            },
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Event"))?;

    Ok(Json(ApiResponse::success(event)))
}

/// DELETE /api/events/{id}
pub async fn delete_event(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    require_role(&ctx, &[Role::Admin])?;

    if !state.store().delete_event(id).await? {
        return Err(ApiError::not_found("Event"));
    }

    Ok(Json(ApiResponse::success(serde_json::json!({ "deleted": true }))))
}
