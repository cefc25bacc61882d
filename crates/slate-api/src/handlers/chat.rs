// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Chat proxy handler.
//!
//! The assistant itself is an opaque collaborator: this handler validates
//! the caller, forwards the message to the configured upstream and returns
//! the assistant's reply.

use axum::{extract::State, response::IntoResponse, Json};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::extractors::Auth;
use crate::response::ChatReply;
use crate::state::AppState;

/// Chat request body.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The user's message.
    pub message: String,
}

/// Upstream request body.
#[derive(Debug, serde::Serialize)]
struct UpstreamRequest<'a> {
    message: &'a str,
    role: &'a str,
}

/// POST /api/chat
///
/// Forwards a chat message to the assistant upstream on behalf of the
/// authenticated caller. One request, one reply; no retry.
pub async fn chat(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Json(request): Json<ChatRequest>,
) -> ApiResult<impl IntoResponse> {
    let role = ctx
        .role
        .ok_or_else(|| ApiError::forbidden("Invalid or missing user role"))?;

    if request.message.trim().is_empty() {
        return Err(ApiError::bad_request("Message is required"));
    }

    let chat_config = &state.config.chat;
    if !chat_config.is_enabled() {
        return Err(ApiError::service_unavailable("Chat is not configured"));
    }

    let mut upstream = state.http.post(&chat_config.upstream_url).json(&UpstreamRequest {
        message: &request.message,
        role: role.as_str(),
    });
    if !chat_config.api_key.is_empty() {
        upstream = upstream.bearer_auth(&chat_config.api_key);
    }

    let response = upstream.send().await.map_err(|e| {
        if e.is_timeout() {
            ApiError::UpstreamTimeout
        } else {
            tracing::warn!(error = %e, "Chat upstream request failed");
            ApiError::service_unavailable("The assistant is unavailable")
        }
    })?;

    if !response.status().is_success() {
        tracing::warn!(status = %response.status(), "Chat upstream returned an error");
        return Err(ApiError::service_unavailable("The assistant is unavailable"));
    }

    let body: serde_json::Value = response
        .json()
        .await
        .map_err(|e| ApiError::internal(format!("Malformed assistant reply: {}", e)))?;

    let reply = extract_reply(&body)
        .ok_or_else(|| ApiError::internal("Assistant reply carried no message"))?;

    Ok(Json(ChatReply { reply, role }))
}

/// Pulls the assistant text out of an upstream reply.
///
/// Known upstream shapes carry the text under `reply`, `message` or
/// `response`.
fn extract_reply(body: &serde_json::Value) -> Option<String> {
    for key in ["reply", "message", "response"] {
        if let Some(text) = body.get(key).and_then(|v| v.as_str()) {
            return Some(text.to_string());
        }
    }
    None
}

// =============================================================================
// Tests
// =============================================================================
