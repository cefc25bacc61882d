// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Health check handlers.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::response::{ComponentStatus, HealthResponse, ReadinessResponse};
use crate::state::AppState;

/// GET /health
///
/// Simple liveness check. Returns 200 OK if the service is running.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse::healthy())
}

/// GET /ready
///
/// Readiness check that verifies the store answers and reports whether a
/// chat upstream is configured.
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let mut components = Vec::new();
    let mut all_healthy = true;

    match state.store().list_admins().await {
        Ok(admins) => components.push(ComponentStatus {
            name: "store".to_string(),
            healthy: true,
            message: Some(format!("{} admin(s)", admins.len())),
        }),
        Err(e) => {
            all_healthy = false;
            components.push(ComponentStatus {
                name: "store".to_string(),
                healthy: false,
                message: Some(e.to_string()),
            });
        }
    }

    components.push(ComponentStatus {
        name: "chat_upstream".to_string(),
        healthy: true,
        message: Some(if state.config.chat.is_enabled() {
            "configured".to_string()
        } else {
            "not configured".to_string()
        }),
    });

    let response = ReadinessResponse {
        ready: all_healthy,
        components,
    };

    if all_healthy {
        (StatusCode::OK, Json(response))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}
