// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Route Guard Integration Tests
//!
//! The navigation scenarios: both gates in order, against a real session
//! manager backed by real storage.

use std::sync::Arc;

use slate_client::{
    ClientConfig, MemorySessionStore, RouteDecision, SessionManager, SessionStore, StoredSession,
};
use slate_core::Role;
use slate_tests::common::{init_test_logging, unsigned_token};

fn manager_with_token(token: Option<String>) -> SessionManager {
    let store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
    if let Some(token) = token {
        store
            .save(&StoredSession {
                token: Some(token),
                user: None,
            })
            .unwrap();
    }
    SessionManager::new(ClientConfig::default(), store).unwrap()
}

#[test]
fn test_no_token_dashboard_redirects_to_login() {
    init_test_logging();

    // Scenario: no token in storage, visiting /dashboard.
    let manager = manager_with_token(None);

    assert_eq!(
        manager.decide_route("/dashboard"),
        RouteDecision::Redirect("/login".to_string())
    );
}

#[test]
fn test_teacher_visiting_admin_students_lands_on_teacher_route() {
    init_test_logging();

    // Scenario: token payload {"role": "teacher"}, visiting /admin/students.
    let token = unsigned_token(serde_json::json!({"role": "teacher"}));
    let manager = manager_with_token(Some(token));

    assert_eq!(manager.role(), Some(Role::Teacher));
    assert_eq!(
        manager.decide_route("/admin/students"),
        RouteDecision::Redirect("/teacher".to_string())
    );
}

#[test]
fn test_matching_role_renders() {
    init_test_logging();

    let token = unsigned_token(serde_json::json!({"role": "admin"}));
    let manager = manager_with_token(Some(token));

    assert_eq!(manager.decide_route("/admin/students"), RouteDecision::Render);
    assert_eq!(manager.decide_route("/admin"), RouteDecision::Render);
    assert_eq!(manager.decide_route("/dashboard"), RouteDecision::Render);
    assert_eq!(manager.decide_route("/chatbot"), RouteDecision::Render);
}

#[test]
fn test_unknown_role_lands_on_generic_dashboard() {
    init_test_logging();

    // Authenticated, but the token carries no recognizable role.
    let token = unsigned_token(serde_json::json!({"sub": "1"}));
    let manager = manager_with_token(Some(token));

    assert!(manager.is_authenticated());
    assert_eq!(manager.role(), None);
    assert_eq!(
        manager.decide_route("/student/results"),
        RouteDecision::Redirect("/dashboard".to_string())
    );
}

#[test]
fn test_public_routes_always_render() {
    init_test_logging();

    let manager = manager_with_token(None);
    assert_eq!(manager.decide_route("/"), RouteDecision::Render);
    assert_eq!(manager.decide_route("/login"), RouteDecision::Render);
}

#[test]
fn test_decision_follows_session_changes() {
    init_test_logging();

    // No caching: the same navigation re-evaluates after logout.
    let token = unsigned_token(serde_json::json!({"role": "student"}));
    let manager = manager_with_token(Some(token));

    assert_eq!(
        manager.decide_route("/student/assignments"),
        RouteDecision::Render
    );

    manager.logout().unwrap();

    assert_eq!(
        manager.decide_route("/student/assignments"),
        RouteDecision::Redirect("/login".to_string())
    );
}

#[test]
fn test_every_role_lands_on_its_own_route() {
    init_test_logging();

    for (role, landing) in [
        (Role::Admin, "/admin"),
        (Role::Teacher, "/teacher"),
        (Role::Student, "/student"),
    ] {
        let token = unsigned_token(serde_json::json!({"role": role.as_str()}));
        let manager = manager_with_token(Some(token));

        // Pick a restricted area belonging to some other role.
        let foreign = match role {
            Role::Admin => "/teacher/results",
            _ => "/admin/students",
        };

        assert_eq!(
            manager.decide_route(foreign),
            RouteDecision::Redirect(landing.to_string()),
            "role {:?}",
            role
        );
    }
}
