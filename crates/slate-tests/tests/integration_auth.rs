// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Authentication Integration Tests
//!
//! Login, token validation and role gating through the real router:
//!
//! - `test_login_*`: credential handling and token issuance
//! - `test_token_*`: bearer token validation on protected routes
//! - `test_role_*`: role-gated access

use axum::http::StatusCode;
use slate_tests::common::{
    bare_request, expect_data, expect_error, expect_status, get_request, init_test_logging,
    json_request, unsigned_token, TestApp, ADMIN_EMAIL, ADMIN_NAME, ADMIN_PASSWORD,
};

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_login_returns_bearer_token() {
    init_test_logging();
    let app = TestApp::new().await;

    let response = app
        .send(json_request(
            "POST",
            "/api/login",
            None,
            &serde_json::json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
        ))
        .await;

    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["status"], true);
    assert_eq!(body["token_type"], "Bearer");
    assert!(body["token"].as_str().is_some_and(|t| t.contains('.')));
}

#[tokio::test]
async fn test_login_unknown_email_message() {
    init_test_logging();
    let app = TestApp::new().await;

    let response = app
        .send(json_request(
            "POST",
            "/api/login",
            None,
            &serde_json::json!({ "email": "nobody@school.example", "password": "x" }),
        ))
        .await;

    let message = expect_error(response, StatusCode::UNAUTHORIZED).await;
    assert_eq!(message, "Invalid email");
}

#[tokio::test]
async fn test_login_wrong_password_message() {
    init_test_logging();
    let app = TestApp::new().await;

    let response = app
        .send(json_request(
            "POST",
            "/api/login",
            None,
            &serde_json::json!({ "email": ADMIN_EMAIL, "password": "wrong" }),
        ))
        .await;

    let message = expect_error(response, StatusCode::UNAUTHORIZED).await;
    assert_eq!(message, "Invalid password");
}

#[tokio::test]
async fn test_login_requires_both_fields() {
    init_test_logging();
    let app = TestApp::new().await;

    let response = app
        .send(json_request(
            "POST",
            "/api/login",
            None,
            &serde_json::json!({ "email": "", "password": "" }),
        ))
        .await;

    expect_status(response, StatusCode::BAD_REQUEST).await;
}

// =============================================================================
// Token validation
// =============================================================================

#[tokio::test]
async fn test_token_grants_access_to_me() {
    init_test_logging();
    let app = TestApp::new().await;
    let token = app.login_admin().await;

    let response = app.send(get_request("/api/me", Some(&token))).await;
    let body = expect_status(response, StatusCode::OK).await;

    assert_eq!(body["role"], "admin");
    assert_eq!(body["name"], ADMIN_NAME);
    assert_eq!(body["email"], ADMIN_EMAIL);
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    init_test_logging();
    let app = TestApp::new().await;

    let response = app.send(get_request("/api/students", None)).await;
    expect_status(response, StatusCode::UNAUTHORIZED).await;
}

#[tokio::test]
async fn test_unsigned_token_is_rejected() {
    init_test_logging();
    let app = TestApp::new().await;

    // A well-formed payload with a forged role, but no valid signature.
    let forged = unsigned_token(serde_json::json!({
        "sub": "1", "role": "admin", "exp": 4102444800i64, "iat": 0
    }));

    let response = app.send(get_request("/api/students", Some(&forged))).await;
    expect_status(response, StatusCode::UNAUTHORIZED).await;
}

#[tokio::test]
async fn test_health_is_public() {
    init_test_logging();
    let app = TestApp::new().await;

    let response = app.send(get_request("/health", None)).await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["status"], "ok");
}

// =============================================================================
// Role gating
// =============================================================================

/// Seeds a teacher and returns a teacher token.
async fn teacher_token(app: &TestApp) -> String {
    let admin = app.login_admin().await;
    let response = app
        .send(json_request(
            "POST",
            "/api/teachers",
            Some(&admin),
            &serde_json::json!({
                "name": "Priya Shah",
                "username": "priya",
                "email": "priya@school.example",
                "password": "teacher-pass-1",
            }),
        ))
        .await;
    expect_data(response).await;

    app.login("priya@school.example", "teacher-pass-1").await
}

#[tokio::test]
async fn test_role_gate_admin_directory() {
    init_test_logging();
    let app = TestApp::new().await;
    let teacher = teacher_token(&app).await;

    // The admin directory group is layered with the role gate.
    let response = app.send(get_request("/api/admins", Some(&teacher))).await;
    expect_status(response, StatusCode::FORBIDDEN).await;

    let admin = app.login_admin().await;
    let response = app.send(get_request("/api/admins", Some(&admin))).await;
    let data = expect_data(response).await;
    assert_eq!(data.as_array().map(|a| a.len()), Some(1));
}

#[tokio::test]
async fn test_role_gate_admin_writes() {
    init_test_logging();
    let app = TestApp::new().await;
    let teacher = teacher_token(&app).await;

    // A teacher cannot create students.
    let response = app
        .send(json_request(
            "POST",
            "/api/students",
            Some(&teacher),
            &serde_json::json!({
                "name": "Mina Park",
                "username": "mina",
                "email": "mina@school.example",
                "password": "pw-123456",
                "section": "A1",
            }),
        ))
        .await;

    let message = expect_error(response, StatusCode::FORBIDDEN).await;
    assert_eq!(message, "Insufficient permissions");
}

#[tokio::test]
async fn test_role_gate_teacher_writes() {
    init_test_logging();
    let app = TestApp::new().await;
    let admin = app.login_admin().await;

    // An admin cannot publish assignments; that is teacher work.
    let response = app
        .send(json_request(
            "POST",
            "/api/assignments",
            Some(&admin),
            &serde_json::json!({
                "title": "Worksheet 1",
                "description": "",
                "due_date": "2025-06-01",
                "subject": "Algebra",
                "total_marks": 100,
            }),
        ))
        .await;

    expect_status(response, StatusCode::FORBIDDEN).await;
}

#[tokio::test]
async fn test_reads_open_to_all_roles() {
    init_test_logging();
    let app = TestApp::new().await;
    let teacher = teacher_token(&app).await;

    let response = app.send(get_request("/api/students", Some(&teacher))).await;
    let data = expect_data(response).await;
    assert!(data.as_array().is_some());
}

#[tokio::test]
async fn test_delete_requires_role() {
    init_test_logging();
    let app = TestApp::new().await;
    let teacher = teacher_token(&app).await;

    let response = app
        .send(bare_request("DELETE", "/api/students/1", Some(&teacher)))
        .await;
    expect_status(response, StatusCode::FORBIDDEN).await;
}
