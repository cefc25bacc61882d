// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # End-to-End Integration Tests
//!
//! The real client against the real server over loopback: login, session
//! persistence, normalized CRUD calls and forced logout on rejected
//! tokens.

use std::sync::Arc;

use slate_client::{
    api::{CreateSection, CreateStudent, CreateTeacher},
    ClientConfig, ClientError, Credentials, FileSessionStore, MemorySessionStore, RouteDecision,
    SessionManager, SessionStore, StoredSession,
};
use slate_core::Role;
use slate_tests::common::{
    init_test_logging, unsigned_token, NetworkApp, ADMIN_EMAIL, ADMIN_NAME, ADMIN_PASSWORD,
};

fn manager_for(app: &NetworkApp, store: Arc<dyn SessionStore>) -> SessionManager {
    SessionManager::new(ClientConfig::new(&app.base_url), store).expect("session manager")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_login_builds_session_from_token() {
    init_test_logging();
    let app = NetworkApp::spawn().await;
    let manager = manager_for(&app, Arc::new(MemorySessionStore::new()));

    let profile = manager
        .login(&Credentials::new(ADMIN_EMAIL, ADMIN_PASSWORD))
        .await
        .expect("login");

    // The profile is derived from the token's claims, not a second call.
    assert_eq!(profile.name, ADMIN_NAME);
    assert_eq!(profile.email, ADMIN_EMAIL);
    assert_eq!(profile.role, Some(Role::Admin));

    assert!(manager.is_authenticated());
    assert_eq!(manager.role(), Some(Role::Admin));
    assert_eq!(manager.decide_route("/admin/students"), RouteDecision::Render);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_login_failure_surfaces_backend_message() {
    init_test_logging();
    let app = NetworkApp::spawn().await;
    let manager = manager_for(&app, Arc::new(MemorySessionStore::new()));

    let err = manager
        .login(&Credentials::new(ADMIN_EMAIL, "wrong-password"))
        .await
        .expect_err("login must fail");

    // The backend's message, verbatim; the session stays empty.
    assert_eq!(err.to_string(), "Invalid password");
    assert!(!manager.is_authenticated());
    assert!(manager.state().store().load().unwrap().token.is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_crud_through_normalized_client() {
    init_test_logging();
    let app = NetworkApp::spawn().await;
    let manager = manager_for(&app, Arc::new(MemorySessionStore::new()));

    manager
        .login(&Credentials::new(ADMIN_EMAIL, ADMIN_PASSWORD))
        .await
        .expect("login");
    let api = manager.api();

    let teacher = api
        .create_teacher(&CreateTeacher {
            name: "Priya Shah".to_string(),
            username: "priya".to_string(),
            email: "priya@school.example".to_string(),
            password: "teacher-pass-1".to_string(),
        })
        .await
        .expect("create teacher");
    assert!(teacher.id > 0);

    api.create_section(&CreateSection {
        name: "A1".to_string(),
        teacher: "Priya Shah".to_string(),
    })
    .await
    .expect("create section");

    let student = api
        .create_student(&CreateStudent {
            name: "Mina Park".to_string(),
            username: "mina".to_string(),
            email: "mina@school.example".to_string(),
            password: "student-pass-1".to_string(),
            section: "A1".to_string(),
        })
        .await
        .expect("create student");

    // The envelope is unwrapped into typed records.
    let students = api.list_students().await.expect("list students");
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].section, "A1");

    let fetched = api.get_student(student.id).await.expect("get student");
    assert_eq!(fetched.name, "Mina Park");

    // A conflict arrives as the server's message, verbatim.
    let err = api
        .create_student(&CreateStudent {
            name: "Other Kid".to_string(),
            username: "other".to_string(),
            email: "mina@school.example".to_string(),
            password: "pw-123456".to_string(),
            section: "A1".to_string(),
        })
        .await
        .expect_err("duplicate email");
    assert_eq!(err.to_string(), "Email already exists");

    // A missing record is an API error, not a decode failure.
    let err = api.get_student(99_999).await.expect_err("missing student");
    assert!(matches!(err, ClientError::Api { status: 404, .. }));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_rejected_token_force_clears_session() {
    init_test_logging();
    let app = NetworkApp::spawn().await;

    // Seed storage with a token the server will reject: right shape,
    // wrong signature.
    let store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
    store
        .save(&StoredSession {
            token: Some(unsigned_token(serde_json::json!({
                "sub": "1", "role": "admin", "exp": 4102444800i64, "iat": 0
            }))),
            user: None,
        })
        .unwrap();

    let manager = manager_for(&app, store);
    assert!(manager.is_authenticated());

    let err = manager
        .api()
        .list_students()
        .await
        .expect_err("rejected token");

    assert!(err.is_session_expired());
    // Fatal for the session: memory and storage are both cleared, and the
    // guard now routes to login.
    assert!(!manager.is_authenticated());
    assert!(manager.state().store().load().unwrap().token.is_none());
    assert_eq!(
        manager.decide_route("/dashboard"),
        RouteDecision::Redirect("/login".to_string())
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_session_survives_restart_and_keeps_working() {
    init_test_logging();
    let app = NetworkApp::spawn().await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    {
        let manager = manager_for(&app, Arc::new(FileSessionStore::new(&path)));
        manager
            .login(&Credentials::new(ADMIN_EMAIL, ADMIN_PASSWORD))
            .await
            .expect("login");
    }

    // A fresh manager over the same file: no re-login, and the restored
    // token still authenticates real calls.
    let manager = manager_for(&app, Arc::new(FileSessionStore::new(&path)));
    assert!(manager.is_authenticated());
    assert_eq!(manager.role(), Some(Role::Admin));

    let admins = manager.api().list_admins().await.expect("list admins");
    assert_eq!(admins.len(), 1);
    assert_eq!(admins[0].email, ADMIN_EMAIL);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_overview_tolerates_partial_failure() {
    init_test_logging();
    let app = NetworkApp::spawn().await;

    // Logged in: the concurrent lists aggregate into the overview.
    let manager = manager_for(&app, Arc::new(MemorySessionStore::new()));
    manager
        .login(&Credentials::new(ADMIN_EMAIL, ADMIN_PASSWORD))
        .await
        .expect("login");

    let overview = manager.api().overview().await;
    assert!(overview.students.is_empty());
    assert!(overview.courses.is_empty());

    // Logged out: every list fails, and each contributes an empty
    // collection instead of aborting the view.
    manager.logout().unwrap();
    let overview = manager.api().overview().await;
    assert!(overview.students.is_empty());
    assert!(overview.teachers.is_empty());
    assert!(overview.events.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_connection_failure_is_transient() {
    init_test_logging();

    // Nothing listens here.
    let manager = SessionManager::new(
        ClientConfig::new("http://127.0.0.1:1/api"),
        Arc::new(MemorySessionStore::new()),
    )
    .expect("session manager");

    let err = manager
        .login(&Credentials::new(ADMIN_EMAIL, ADMIN_PASSWORD))
        .await
        .expect_err("connect must fail");

    assert!(err.is_transient());
    assert!(!manager.is_authenticated());
}
