// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API server implementation.

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use slate_core::Role;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::auth::{password, JwtManager};
use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::handlers;
use crate::middleware::{AuthLayer, RoleLayer};
use crate::state::{AppState, AppStateBuilder};
use crate::store::{NewAdmin, Store};

// =============================================================================
// ApiServer
// =============================================================================

/// The API server.
///
/// This is the main entry point for creating and running the HTTP server.
pub struct ApiServer {
    state: AppState,
    config: Arc<ApiConfig>,
}

impl ApiServer {
    /// Creates a new API server with the given state.
    pub fn new(state: AppState) -> Self {
        let config = state.config.clone();
        Self { state, config }
    }

    /// Returns a builder.
    pub fn builder() -> ApiServerBuilder {
        ApiServerBuilder::new()
    }

    /// Creates the router with all routes and middleware.
    pub fn router(&self) -> Router {
        let cors = create_cors_layer(&self.config);
        let auth = AuthLayer::new(self.state.jwt_manager.clone()).with_default_public_paths();

        let middleware_stack = ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(self.config.request_timeout))
            .layer(cors)
            .layer(auth);

        // The admin directory is gated as a group; every other resource
        // enforces its write role in the handler.
        let admin_directory = Router::new()
            .route(
                "/api/admins",
                get(handlers::admins::list_admins).post(handlers::admins::create_admin),
            )
            .route_layer(RoleLayer::allow(Role::Admin));

        Router::new()
            // Health endpoints (public)
            .route("/health", get(handlers::health::health))
            .route("/ready", get(handlers::health::ready))
            // Auth endpoints
            .route("/api/login", post(handlers::auth::login))
            .route("/api/me", get(handlers::auth::current_user))
            // Directory
            .merge(admin_directory)
            .route(
                "/api/students",
                get(handlers::students::list_students).post(handlers::students::create_student),
            )
            .route(
                "/api/students/{id}",
                get(handlers::students::get_student)
                    .put(handlers::students::update_student)
                    .delete(handlers::students::delete_student),
            )
            .route(
                "/api/teachers",
                get(handlers::teachers::list_teachers).post(handlers::teachers::create_teacher),
            )
            .route(
                "/api/teachers/{id}",
                get(handlers::teachers::get_teacher)
                    .put(handlers::teachers::update_teacher)
                    .delete(handlers::teachers::delete_teacher),
            )
            // Structure
            .route(
                "/api/sections",
                get(handlers::sections::list_sections).post(handlers::sections::create_section),
            )
            .route(
                "/api/sections/{id}",
                get(handlers::sections::get_section)
                    .put(handlers::sections::update_section)
                    .delete(handlers::sections::delete_section),
            )
            .route(
                "/api/courses",
                get(handlers::courses::list_courses).post(handlers::courses::create_course),
            )
            .route(
                "/api/courses/{id}",
                get(handlers::courses::get_course)
                    .put(handlers::courses::update_course)
                    .delete(handlers::courses::delete_course),
            )
            .route(
                "/api/subjects",
                get(handlers::subjects::list_subjects).post(handlers::subjects::create_subject),
            )
            .route(
                "/api/subjects/{id}",
                get(handlers::subjects::get_subject)
                    .put(handlers::subjects::update_subject)
                    .delete(handlers::subjects::delete_subject),
            )
            .route(
                "/api/enrollments",
                get(handlers::enrollments::list_enrollments)
                    .post(handlers::enrollments::create_enrollment),
            )
            .route(
                "/api/enrollments/{id}",
                axum::routing::put(handlers::enrollments::update_enrollment)
                    .delete(handlers::enrollments::delete_enrollment),
            )
            // Coursework
            .route(
                "/api/assignments",
                get(handlers::assignments::list_assignments)
                    .post(handlers::assignments::create_assignment),
            )
            .route(
                "/api/assignments/{id}",
                get(handlers::assignments::get_assignment)
                    .put(handlers::assignments::update_assignment)
                    .delete(handlers::assignments::delete_assignment),
            )
            .route(
                "/api/submissions",
                get(handlers::submissions::list_submissions)
                    .post(handlers::submissions::create_submission),
            )
            .route(
                "/api/submissions/{id}",
                axum::routing::put(handlers::submissions::update_submission)
                    .delete(handlers::submissions::delete_submission),
            )
            .route(
                "/api/attendance",
                get(handlers::attendance::list_attendance)
                    .post(handlers::attendance::create_attendance),
            )
            .route(
                "/api/attendance/{id}",
                axum::routing::put(handlers::attendance::update_attendance)
                    .delete(handlers::attendance::delete_attendance),
            )
            .route(
                "/api/results",
                get(handlers::results::list_results).post(handlers::results::create_result),
            )
            .route(
                "/api/results/{id}",
                get(handlers::results::get_result)
                    .put(handlers::results::update_result)
                    .delete(handlers::results::delete_result),
            )
            // Communication
            .route(
                "/api/announcements",
                get(handlers::announcements::list_announcements)
                    .post(handlers::announcements::create_announcement),
            )
            .route(
                "/api/announcements/{id}",
                get(handlers::announcements::get_announcement)
                    .put(handlers::announcements::update_announcement)
                    .delete(handlers::announcements::delete_announcement),
            )
            .route(
                "/api/events",
                get(handlers::events::list_events).post(handlers::events::create_event),
            )
            .route(
                "/api/events/{id}",
                get(handlers::events::get_event)
                    .put(handlers::events::update_event)
                    .delete(handlers::events::delete_event),
            )
            // Chat
            .route("/api/chat", post(handlers::chat::chat))
            // Apply middleware and state
            .layer(middleware_stack)
            .with_state(self.state.clone())
    }

    /// Seeds the bootstrap admin into an empty directory.
    pub async fn bootstrap(&self) -> ApiResult<()> {
        let Some(bootstrap) = &self.config.bootstrap_admin else {
            return Ok(());
        };

        if !self.state.store().list_admins().await?.is_empty() {
            return Ok(());
        }

        let admin = self
            .state
            .store()
            .create_admin(NewAdmin {
                name: bootstrap.name.clone(),
                username: bootstrap.username.clone(),
                email: bootstrap.email.clone(),
                password_hash: password::hash_password(&bootstrap.password)?,
            })
            .await?;

        info!(id = admin.id, email = %admin.email, "Bootstrap admin created");
        Ok(())
    }

    /// Runs the server.
    pub async fn run(self) -> ApiResult<()> {
        self.run_with_shutdown(std::future::pending()).await
    }

    /// Runs the server with graceful shutdown.
    pub async fn run_with_shutdown(
        self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> ApiResult<()> {
        self.bootstrap().await?;

        let addr = self.config.socket_addr();
        let router = self.router();

        info!("Starting API server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ApiError::internal(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| ApiError::internal(format!("Server error: {}", e)))?;

        info!("API server shutdown complete");

        Ok(())
    }

    /// Returns the server address.
    pub fn addr(&self) -> std::net::SocketAddr {
        self.config.socket_addr()
    }

    /// Returns the shared state.
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Creates the CORS layer from configuration.
fn create_cors_layer(config: &ApiConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ]);

    if config.cors_origins.iter().any(|o| o == "*") {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

// =============================================================================
// Server Builder
// =============================================================================

/// Builder for creating the API server.
pub struct ApiServerBuilder {
    state_builder: AppStateBuilder,
}

impl ApiServerBuilder {
    /// Creates a new server builder.
    pub fn new() -> Self {
        Self {
            state_builder: AppState::builder(),
        }
    }

    /// Sets the configuration.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.state_builder = self.state_builder.config(config);
        self
    }

    /// Sets the JWT manager.
    pub fn jwt_manager(mut self, manager: Arc<JwtManager>) -> Self {
        self.state_builder = self.state_builder.jwt_manager(manager);
        self
    }

    /// Sets the record store.
    pub fn store(mut self, store: Arc<dyn Store>) -> Self {
        self.state_builder = self.state_builder.store(store);
        self
    }

    /// Builds the server.
    pub fn build(self) -> ApiResult<ApiServer> {
        let state = self.state_builder.build()?;
        Ok(ApiServer::new(state))
    }
}

impl Default for ApiServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
