// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Client error types.
//!
//! The taxonomy mirrors how failures are surfaced to users:
//!
//! - decode failures never become errors at all (the codec returns `None`
//!   and the session reads as absent);
//! - network and timeout failures are transient, with a generic
//!   try-again message;
//! - a rejected token (401/422) ends the session;
//! - validation/business errors carry the server's message verbatim.
//!
//! Nothing retries. A failed request is reported once.

use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Client-side errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request exceeded the configured timeout.
    #[error("Request timed out. The server is taking too long to respond. Please try again.")]
    Timeout,

    /// The server could not be reached.
    #[error("Cannot connect to server: {0}")]
    Connection(String),

    /// The backend rejected the token (401/422). The session has been
    /// cleared; the user must log in again.
    #[error("Your session has expired. Please log in again.")]
    SessionExpired,

    /// The backend reported a request failure. The message is surfaced
    /// verbatim.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// A response did not match the endpoint's documented shape contract.
    #[error("Unexpected response shape from {endpoint}: {detail}")]
    UnexpectedShape {
        /// The endpoint that produced the response.
        endpoint: String,
        /// What was wrong with the shape.
        detail: String,
    },

    /// The session store failed.
    #[error("Session storage failure: {0}")]
    Storage(String),
}

impl ClientError {
    /// Creates an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Creates an unexpected-shape error.
    pub fn unexpected_shape(endpoint: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::UnexpectedShape {
            endpoint: endpoint.into(),
            detail: detail.into(),
        }
    }

    /// Returns `true` for transient failures worth retrying manually.
    pub fn is_transient(&self) -> bool {
        matches!(self, ClientError::Timeout | ClientError::Connection(_))
    }

    /// Returns `true` when the session was force-cleared.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ClientError::SessionExpired)
    }
}

// =============================================================================
// Error message extraction
// =============================================================================

/// Extracts a user-facing message from an error response body.
///
/// Probes, in order: a bare string body, `message`, `error` (string or
/// object with `message`), `detail`, then a `errors` field map rendered as
/// `field: a, b; field2: c`. Falls back to the HTTP status line.
pub fn extract_error_message(status: u16, body: &serde_json::Value) -> String {
    if let Some(text) = body.as_str() {
        if !text.is_empty() {
            return text.to_string();
        }
    }

    if let Some(message) = body.get("message").and_then(|v| v.as_str()) {
        return message.to_string();
    }

    if let Some(error) = body.get("error") {
        if let Some(text) = error.as_str() {
            return text.to_string();
        }
        if let Some(message) = error.get("message").and_then(|v| v.as_str()) {
            return message.to_string();
        }
    }

    if let Some(detail) = body.get("detail").and_then(|v| v.as_str()) {
        return detail.to_string();
    }

    if let Some(errors) = body.get("errors").and_then(|v| v.as_object()) {
        let rendered: Vec<String> = errors
            .iter()
            .map(|(field, messages)| {
                let joined = match messages {
                    serde_json::Value::Array(items) => items
                        .iter()
                        .filter_map(|m| m.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                    other => other.as_str().unwrap_or_default().to_string(),
                };
                format!("{}: {}", field, joined)
            })
            .collect();
        if !rendered.is_empty() {
            return rendered.join("; ");
        }
    }

    let reason = http_reason(status);
    if reason.is_empty() {
        format!("{}", status)
    } else {
        format!("{}: {}", status, reason)
    }
}

fn http_reason(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        409 => "Conflict",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => "",
    }
}

// =============================================================================
// Tests
// =============================================================================
