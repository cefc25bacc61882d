// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Authentication context.

use serde::{Deserialize, Serialize};
use slate_core::Role;
use uuid::Uuid;

use super::Claims;

/// Authentication context for a request.
///
/// Attached to requests by the auth middleware and consumed by handlers via
/// the `Auth` extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthContext {
    /// User id (the token subject).
    pub user_id: String,
    /// Platform role; `None` for anonymous requests on public paths.
    pub role: Option<Role>,
    /// User's display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// User's login name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// User's email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Request ID for tracing.
    pub request_id: Uuid,
}

impl AuthContext {
    /// Creates a new authentication context from JWT claims.
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            user_id: claims.sub.clone(),
            role: Some(claims.role),
            name: claims.name.clone(),
            username: claims.username.clone(),
            email: claims.email.clone(),
            request_id: Uuid::now_v7(),
        }
    }

    /// Creates an anonymous context (for unauthenticated requests).
    pub fn anonymous() -> Self {
        Self {
            user_id: "anonymous".to_string(),
            role: None,
            name: None,
            username: None,
            email: None,
            request_id: Uuid::now_v7(),
        }
    }

    /// Sets the request ID.
    pub fn with_request_id(mut self, request_id: Uuid) -> Self {
        self.request_id = request_id;
        self
    }

    /// Returns `true` if this is an anonymous context.
    pub fn is_anonymous(&self) -> bool {
        self.role.is_none()
    }

    /// Returns `true` if the context carries the given role.
    pub fn has_role(&self, role: Role) -> bool {
        self.role == Some(role)
    }

    /// Returns `true` if the context carries any of the given roles.
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.role.is_some_and(|r| roles.contains(&r))
    }

    /// Returns `true` if this context has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::anonymous()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_context_from_claims() {
        let claims = Claims::new(123, Role::Teacher, 3600).with_name("Priya Shah");
        let ctx = AuthContext::from_claims(&claims);

        assert_eq!(ctx.user_id, "123");
        assert!(ctx.has_role(Role::Teacher));
        assert!(!ctx.is_admin());
        assert!(!ctx.is_anonymous());
    }

    #[test]
    fn test_anonymous_context() {
        let ctx = AuthContext::anonymous();

        assert!(ctx.is_anonymous());
        assert!(!ctx.is_admin());
        assert!(ctx.role.is_none());
    }

    #[test]
    fn test_has_any_role() {
        let claims = Claims::new(1, Role::Student, 3600);
        let ctx = AuthContext::from_claims(&claims);

        assert!(ctx.has_any_role(&[Role::Teacher, Role::Student]));
        assert!(!ctx.has_any_role(&[Role::Teacher, Role::Admin]));
        assert!(!AuthContext::anonymous().has_any_role(&[Role::Student]));
    }
}
