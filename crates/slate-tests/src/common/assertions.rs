// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Response assertion helpers.

use axum::body::Body;
use axum::http::{Response, StatusCode};
use http_body_util::BodyExt;

/// Reads a response body as JSON.
pub async fn read_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collection")
        .to_bytes();
    if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    }
}

/// Asserts the status code, returning the parsed JSON body.
pub async fn expect_status(response: Response<Body>, expected: StatusCode) -> serde_json::Value {
    let status = response.status();
    let body = read_json(response).await;
    assert_eq!(status, expected, "unexpected status; body: {}", body);
    body
}

/// Asserts a successful envelope (`200`, `success: true`), returning its
/// `data` field.
pub async fn expect_data(response: Response<Body>) -> serde_json::Value {
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(
        body.get("success").and_then(|v| v.as_bool()),
        Some(true),
        "expected success envelope; body: {}",
        body
    );
    body.get("data").cloned().unwrap_or(serde_json::Value::Null)
}

/// Asserts an error response, returning the flat error message.
pub async fn expect_error(response: Response<Body>, expected: StatusCode) -> String {
    let body = expect_status(response, expected).await;
    body.get("message")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| panic!("expected an error message; body: {}", body))
}
