// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Role-based access control middleware.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
};
use slate_core::Role;
use tower::{Layer, Service};

use crate::auth::AuthContext;
use crate::error::ApiError;

// =============================================================================
// RoleLayer
// =============================================================================

/// Layer for role-based access control.
///
/// Checks that the authenticated caller's role is in the allowed set. Runs
/// after `AuthLayer`: an absent or anonymous context is a 401, a
/// wrong-role caller is a 403.
#[derive(Clone)]
pub struct RoleLayer {
    allowed: Arc<Vec<Role>>,
}

impl RoleLayer {
    /// Creates a layer allowing a single role.
    pub fn allow(role: Role) -> Self {
        Self {
            allowed: Arc::new(vec![role]),
        }
    }

    /// Creates a layer allowing any of the given roles.
    pub fn allow_any(roles: Vec<Role>) -> Self {
        Self {
            allowed: Arc::new(roles),
        }
    }
}

impl<S> Layer<S> for RoleLayer {
    type Service = RoleMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RoleMiddleware {
            inner,
            allowed: self.allowed.clone(),
        }
    }
}

// =============================================================================
// RoleMiddleware
// =============================================================================

/// Middleware for role enforcement.
#[derive(Clone)]
pub struct RoleMiddleware<S> {
    inner: S,
    allowed: Arc<Vec<Role>>,
}

impl<S> Service<Request<Body>> for RoleMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let allowed = self.allowed.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let auth_ctx = req.extensions().get::<AuthContext>().cloned();

            match auth_ctx {
                Some(ctx) if !ctx.is_anonymous() => {
                    if ctx.has_any_role(&allowed) {
                        inner.call(req).await
                    } else {
                        tracing::warn!(
                            user_id = %ctx.user_id,
                            role = ?ctx.role,
                            allowed = ?allowed.as_slice(),
                            "Role not permitted"
                        );
                        Ok(ApiError::forbidden("Insufficient permissions").into_response())
                    }
                }
                _ => {
                    tracing::warn!("No auth context found, denying access");
                    Ok(ApiError::unauthorized("Authentication required").into_response())
                }
            }
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
