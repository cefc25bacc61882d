// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Test harnesses.
//!
//! `TestApp` drives the router in-process with `tower::ServiceExt`;
//! `NetworkApp` binds a real listener for client-against-server tests.

use axum::body::Body;
use axum::http::{Request, Response};
use tower::ServiceExt;

use slate_api::{ApiConfig, ApiServer};

use super::assertions::expect_status;
use super::builders::json_request;
use super::fixtures::{test_api_config, ADMIN_EMAIL, ADMIN_PASSWORD};

// =============================================================================
// TestApp
// =============================================================================

/// In-process test application: the real router, no network.
pub struct TestApp {
    server: ApiServer,
}

impl TestApp {
    /// Creates a test app with the default test config and a seeded
    /// bootstrap admin.
    pub async fn new() -> Self {
        Self::with_config(test_api_config()).await
    }

    /// Creates a test app with a custom config.
    pub async fn with_config(config: ApiConfig) -> Self {
        let server = ApiServer::builder()
            .config(config)
            .build()
            .expect("server construction");
        server.bootstrap().await.expect("bootstrap admin");
        Self { server }
    }

    /// Sends a request through the full middleware stack.
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.server
            .router()
            .oneshot(request)
            .await
            .expect("router call")
    }

    /// Logs in and returns the bearer token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .send(json_request(
                "POST",
                "/api/login",
                None,
                &serde_json::json!({ "email": email, "password": password }),
            ))
            .await;

        let body = expect_status(response, axum::http::StatusCode::OK).await;
        body.get("token")
            .and_then(|v| v.as_str())
            .expect("login token")
            .to_string()
    }

    /// Logs in as the bootstrap admin.
    pub async fn login_admin(&self) -> String {
        self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    /// Returns the underlying server.
    pub fn server(&self) -> &ApiServer {
        &self.server
    }
}

// =============================================================================
// NetworkApp
// =============================================================================

/// Network test application: the real server on an ephemeral port, for
/// driving the real client against it.
pub struct NetworkApp {
    /// Base URL of the running server's API, including the `/api` prefix.
    pub base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl NetworkApp {
    /// Binds an ephemeral port and serves the test app on it.
    pub async fn spawn() -> Self {
        Self::spawn_with_config(test_api_config()).await
    }

    /// Binds an ephemeral port and serves a custom config on it.
    pub async fn spawn_with_config(config: ApiConfig) -> Self {
        let server = ApiServer::builder()
            .config(config)
            .build()
            .expect("server construction");
        server.bootstrap().await.expect("bootstrap admin");

        let router = server.router();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("ephemeral bind");
        let addr = listener.local_addr().expect("local addr");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                eprintln!("test server error: {}", e);
            }
        });

        Self {
            base_url: format!("http://{}/api", addr),
            handle,
        }
    }
}

impl Drop for NetworkApp {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
