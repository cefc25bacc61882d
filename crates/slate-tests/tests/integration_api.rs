// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # API Integration Tests
//!
//! Entity CRUD through the real router: directory setup, coursework flow
//! (assignment → submission → grading), attendance and results, conflicts
//! and cross-reference validation.

use axum::http::StatusCode;
use slate_tests::common::{
    bare_request, expect_data, expect_error, expect_status, get_request, init_test_logging,
    json_request, TestApp,
};

/// Seeds the usual school structure and returns (admin, teacher, student)
/// tokens.
async fn seeded_school(app: &TestApp) -> (String, String, String) {
    let admin = app.login_admin().await;

    let create = |path: &'static str, body: serde_json::Value, token: String| async move {
        let response = app
            .send(json_request("POST", path, Some(&token), &body))
            .await;
        expect_data(response).await
    };

    create(
        "/api/teachers",
        serde_json::json!({
            "name": "Priya Shah",
            "username": "priya",
            "email": "priya@school.example",
            "password": "teacher-pass-1",
        }),
        admin.clone(),
    )
    .await;
    create(
        "/api/sections",
        serde_json::json!({ "name": "A1", "teacher": "Priya Shah" }),
        admin.clone(),
    )
    .await;
    create(
        "/api/courses",
        serde_json::json!({
            "name": "Mathematics",
            "description": "Core maths",
            "course_code": "MATH-101",
            "teacher": "Priya Shah",
        }),
        admin.clone(),
    )
    .await;
    create(
        "/api/subjects",
        serde_json::json!({
            "name": "Algebra",
            "teacher": "Priya Shah",
            "course": "Mathematics",
        }),
        admin.clone(),
    )
    .await;
    create(
        "/api/students",
        serde_json::json!({
            "name": "Mina Park",
            "username": "mina",
            "email": "mina@school.example",
            "password": "student-pass-1",
            "section": "A1",
        }),
        admin.clone(),
    )
    .await;

    let teacher = app.login("priya@school.example", "teacher-pass-1").await;
    let student = app.login("mina@school.example", "student-pass-1").await;

    (admin, teacher, student)
}

// =============================================================================
// Directory CRUD
// =============================================================================

#[tokio::test]
async fn test_student_crud_round_trip() {
    init_test_logging();
    let app = TestApp::new().await;
    let (admin, _, _) = seeded_school(&app).await;

    // List carries pagination metadata.
    let response = app.send(get_request("/api/students", Some(&admin))).await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["meta"]["total"], 1);
    let id = body["data"][0]["id"].as_i64().expect("student id");

    // Update the section-less fields.
    let response = app
        .send(json_request(
            "PUT",
            &format!("/api/students/{}", id),
            Some(&admin),
            &serde_json::json!({ "name": "Mina J. Park" }),
        ))
        .await;
    let updated = expect_data(response).await;
    assert_eq!(updated["name"], "Mina J. Park");
    assert_eq!(updated["section"], "A1");

    // Delete, then 404.
    let response = app
        .send(bare_request(
            "DELETE",
            &format!("/api/students/{}", id),
            Some(&admin),
        ))
        .await;
    expect_data(response).await;

    let response = app
        .send(get_request(&format!("/api/students/{}", id), Some(&admin)))
        .await;
    expect_status(response, StatusCode::NOT_FOUND).await;
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    init_test_logging();
    let app = TestApp::new().await;
    let (admin, _, _) = seeded_school(&app).await;

    let response = app
        .send(json_request(
            "POST",
            "/api/students",
            Some(&admin),
            &serde_json::json!({
                "name": "Other Kid",
                "username": "other",
                "email": "mina@school.example",
                "password": "pw-123456",
                "section": "A1",
            }),
        ))
        .await;

    let message = expect_error(response, StatusCode::CONFLICT).await;
    assert_eq!(message, "Email already exists");
}

#[tokio::test]
async fn test_unknown_section_is_validation_error() {
    init_test_logging();
    let app = TestApp::new().await;
    let (admin, _, _) = seeded_school(&app).await;

    let response = app
        .send(json_request(
            "POST",
            "/api/students",
            Some(&admin),
            &serde_json::json!({
                "name": "Lost Kid",
                "username": "lost",
                "email": "lost@school.example",
                "password": "pw-123456",
                "section": "Z9",
            }),
        ))
        .await;

    let message = expect_error(response, StatusCode::BAD_REQUEST).await;
    assert!(message.contains("Section 'Z9' not found"));
}

#[tokio::test]
async fn test_teacher_subjects_are_derived() {
    init_test_logging();
    let app = TestApp::new().await;
    let (admin, _, _) = seeded_school(&app).await;

    let response = app.send(get_request("/api/teachers", Some(&admin))).await;
    let data = expect_data(response).await;

    assert_eq!(data[0]["subjects"], serde_json::json!(["Algebra"]));
}

// =============================================================================
// Coursework flow
// =============================================================================

#[tokio::test]
async fn test_assignment_submission_grading_flow() {
    init_test_logging();
    let app = TestApp::new().await;
    let (_, teacher, student) = seeded_school(&app).await;

    // Teacher publishes an assignment; the owning teacher is derived from
    // the subject.
    let response = app
        .send(json_request(
            "POST",
            "/api/assignments",
            Some(&teacher),
            &serde_json::json!({
                "title": "Worksheet 1",
                "description": "Solve all",
                "due_date": "2025-06-01",
                "subject": "Algebra",
                "total_marks": 100,
            }),
        ))
        .await;
    let assignment = expect_data(response).await;
    assert_eq!(assignment["teacher"], "Priya Shah");

    // Student submits; the submitting student comes from the token.
    let response = app
        .send(json_request(
            "POST",
            "/api/submissions",
            Some(&student),
            &serde_json::json!({
                "assignment": "Worksheet 1",
                "submission_text": "My answers",
            }),
        ))
        .await;
    let submission = expect_data(response).await;
    assert_eq!(submission["student"], "Mina Park");
    let submission_id = submission["id"].as_i64().expect("submission id");

    // Submitting twice conflicts.
    let response = app
        .send(json_request(
            "POST",
            "/api/submissions",
            Some(&student),
            &serde_json::json!({
                "assignment": "Worksheet 1",
                "submission_text": "Again",
            }),
        ))
        .await;
    expect_status(response, StatusCode::CONFLICT).await;

    // Teacher grades.
    let response = app
        .send(json_request(
            "PUT",
            &format!("/api/submissions/{}", submission_id),
            Some(&teacher),
            &serde_json::json!({ "marks_obtained": 88, "feedback": "Good work" }),
        ))
        .await;
    let graded = expect_data(response).await;
    assert_eq!(graded["marks_obtained"], 88);
    assert_eq!(graded["feedback"], "Good work");
}

#[tokio::test]
async fn test_student_sees_only_own_submissions() {
    init_test_logging();
    let app = TestApp::new().await;
    let (admin, teacher, student) = seeded_school(&app).await;

    // A second student with a submission of their own.
    let response = app
        .send(json_request(
            "POST",
            "/api/students",
            Some(&admin),
            &serde_json::json!({
                "name": "Leo Brandt",
                "username": "leo",
                "email": "leo@school.example",
                "password": "student-pass-2",
                "section": "A1",
            }),
        ))
        .await;
    expect_data(response).await;
    let other = app.login("leo@school.example", "student-pass-2").await;

    let response = app
        .send(json_request(
            "POST",
            "/api/assignments",
            Some(&teacher),
            &serde_json::json!({
                "title": "Worksheet 1",
                "description": "",
                "due_date": "2025-06-01",
                "subject": "Algebra",
                "total_marks": 50,
            }),
        ))
        .await;
    expect_data(response).await;

    for (token, text) in [(&student, "Mina's work"), (&other, "Leo's work")] {
        let response = app
            .send(json_request(
                "POST",
                "/api/submissions",
                Some(token),
                &serde_json::json!({
                    "assignment": "Worksheet 1",
                    "submission_text": text,
                }),
            ))
            .await;
        expect_data(response).await;
    }

    // Even asking for everything, a student gets their own rows only.
    let response = app
        .send(get_request("/api/submissions", Some(&student)))
        .await;
    let data = expect_data(response).await;
    let rows = data.as_array().expect("submission rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["student"], "Mina Park");

    // The teacher sees both.
    let response = app
        .send(get_request("/api/submissions", Some(&teacher)))
        .await;
    let data = expect_data(response).await;
    assert_eq!(data.as_array().map(|a| a.len()), Some(2));
}

// =============================================================================
// Attendance & Results
// =============================================================================

#[tokio::test]
async fn test_attendance_flow() {
    init_test_logging();
    let app = TestApp::new().await;
    let (_, teacher, _) = seeded_school(&app).await;

    let response = app
        .send(json_request(
            "POST",
            "/api/attendance",
            Some(&teacher),
            &serde_json::json!({
                "student": "Mina Park",
                "subject": "Algebra",
                "status": "late",
            }),
        ))
        .await;
    let record = expect_data(response).await;
    assert_eq!(record["status"], "late");
    let id = record["id"].as_i64().expect("attendance id");

    let response = app
        .send(json_request(
            "PUT",
            &format!("/api/attendance/{}", id),
            Some(&teacher),
            &serde_json::json!({ "status": "present" }),
        ))
        .await;
    let updated = expect_data(response).await;
    assert_eq!(updated["status"], "present");

    // Filtered listing.
    let response = app
        .send(get_request(
            "/api/attendance?student=Mina%20Park&subject=Algebra",
            Some(&teacher),
        ))
        .await;
    let data = expect_data(response).await;
    assert_eq!(data.as_array().map(|a| a.len()), Some(1));
}

#[tokio::test]
async fn test_result_marks_validation() {
    init_test_logging();
    let app = TestApp::new().await;
    let (_, teacher, _) = seeded_school(&app).await;

    let response = app
        .send(json_request(
            "POST",
            "/api/results",
            Some(&teacher),
            &serde_json::json!({
                "student": "Mina Park",
                "subject": "Algebra",
                "total_marks": 100,
                "obtained_marks": 110,
                "exam_type": "midterm",
                "remarks": "",
            }),
        ))
        .await;

    let message = expect_error(response, StatusCode::BAD_REQUEST).await;
    assert!(message.contains("obtained_marks"));
}

#[tokio::test]
async fn test_student_results_are_scoped() {
    init_test_logging();
    let app = TestApp::new().await;
    let (_, teacher, student) = seeded_school(&app).await;

    let response = app
        .send(json_request(
            "POST",
            "/api/results",
            Some(&teacher),
            &serde_json::json!({
                "student": "Mina Park",
                "subject": "Algebra",
                "total_marks": 100,
                "obtained_marks": 91,
                "exam_type": "final",
                "remarks": "Strong",
            }),
        ))
        .await;
    expect_data(response).await;

    let response = app.send(get_request("/api/results", Some(&student))).await;
    let data = expect_data(response).await;
    assert_eq!(data[0]["obtained_marks"], 91);
}

// =============================================================================
// Communication
// =============================================================================

#[tokio::test]
async fn test_announcement_attribution_and_enrollment() {
    init_test_logging();
    let app = TestApp::new().await;
    let (admin, teacher, _) = seeded_school(&app).await;

    // The posting teacher comes from the token, not the payload.
    let response = app
        .send(json_request(
            "POST",
            "/api/announcements",
            Some(&teacher),
            &serde_json::json!({
                "title": "Exam week",
                "content": "Revise chapters 1-4",
                "target_audience": "students",
                "section": "A1",
            }),
        ))
        .await;
    let announcement = expect_data(response).await;
    assert_eq!(announcement["teacher"], "Priya Shah");

    // Enrollment with a filterable listing.
    let response = app
        .send(json_request(
            "POST",
            "/api/enrollments",
            Some(&admin),
            &serde_json::json!({
                "student": "Mina Park",
                "course": "Mathematics",
                "enrollment_date": "2025-01-15",
                "status": "active",
                "grade": "",
            }),
        ))
        .await;
    expect_data(response).await;

    let response = app
        .send(get_request(
            "/api/enrollments?course=Mathematics",
            Some(&admin),
        ))
        .await;
    let data = expect_data(response).await;
    assert_eq!(data[0]["student"], "Mina Park");
}

#[tokio::test]
async fn test_event_attribution() {
    init_test_logging();
    let app = TestApp::new().await;
    let (admin, _, _) = seeded_school(&app).await;

    let response = app
        .send(json_request(
            "POST",
            "/api/events",
            Some(&admin),
            &serde_json::json!({
                "title": "Sports day",
                "description": "Annual games",
                "event_date": "2025-09-10",
                "event_time": "09:30:00",
            }),
        ))
        .await;
    let event = expect_data(response).await;
    assert_eq!(event["admin"], "Root Admin");
}

#[tokio::test]
async fn test_chat_unconfigured_is_unavailable() {
    init_test_logging();
    let app = TestApp::new().await;
    let admin = app.login_admin().await;

    let response = app
        .send(json_request(
            "POST",
            "/api/chat",
            Some(&admin),
            &serde_json::json!({ "message": "hello" }),
        ))
        .await;

    expect_status(response, StatusCode::SERVICE_UNAVAILABLE).await;
}
