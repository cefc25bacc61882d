// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Route access decisions.
//!
//! Two gates, evaluated in order on every navigation:
//!
//! 1. **Authenticated?** No token means the login route, unconditionally.
//! 2. **Authorized?** A route with an allowed-roles set turns away other
//!    roles, redirecting them to their own landing route (or the generic
//!    dashboard when the role is unknown).
//!
//! Decisions are never cached; every navigation re-evaluates both gates.

use slate_core::Role;

/// The login route.
pub const LOGIN_ROUTE: &str = "/login";

/// The generic dashboard, the landing route for authenticated users whose
/// role could not be determined.
pub const DASHBOARD_ROUTE: &str = "/dashboard";

// =============================================================================
// Route table
// =============================================================================

/// Who may enter a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAccess {
    /// No authentication required.
    Public,
    /// Any authenticated user.
    Authenticated,
    /// Only the listed roles.
    Roles(Vec<Role>),
}

/// A registered route.
#[derive(Debug, Clone)]
pub struct RouteRule {
    /// The route path. A trailing `*` matches by prefix.
    pub path: String,
    /// Who may enter.
    pub access: RouteAccess,
}

/// The application's route table.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
}

impl RouteTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The platform's route table: the public pages, the shared dashboard
    /// and chat, each role's landing page and the role-scoped areas.
    pub fn slate_default() -> Self {
        let mut table = Self::new();

        table.register("/", RouteAccess::Public);
        table.register(LOGIN_ROUTE, RouteAccess::Public);

        table.register(DASHBOARD_ROUTE, RouteAccess::Authenticated);
        table.register("/chatbot", RouteAccess::Authenticated);

        for role in Role::all() {
            table.register(role.default_route(), RouteAccess::Roles(vec![role]));
            table.register(
                &format!("{}/*", role.default_route()),
                RouteAccess::Roles(vec![role]),
            );
        }

        table
    }

    /// Registers a route.
    pub fn register(&mut self, path: &str, access: RouteAccess) {
        self.rules.push(RouteRule {
            path: path.to_string(),
            access,
        });
    }

    /// Finds the rule governing a path. Exact matches win over prefix
    /// (`*`) matches.
    pub fn rule_for(&self, path: &str) -> Option<&RouteRule> {
        if let Some(rule) = self.rules.iter().find(|r| r.path == path) {
            return Some(rule);
        }

        self.rules.iter().find(|r| {
            r.path
                .strip_suffix('*')
                .is_some_and(|prefix| path.starts_with(prefix))
        })
    }
}

// =============================================================================
// RouteGuard
// =============================================================================

/// The outcome of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the requested view.
    Render,
    /// Redirect to the given route instead.
    Redirect(String),
}

impl RouteDecision {
    fn redirect(to: &str) -> Self {
        RouteDecision::Redirect(to.to_string())
    }
}

/// Gates navigation on authentication state and per-route allowed roles.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    table: RouteTable,
}

impl RouteGuard {
    /// Creates a guard over the given route table.
    pub fn new(table: RouteTable) -> Self {
        Self { table }
    }

    /// Creates a guard over the platform's default route table.
    pub fn slate_default() -> Self {
        Self::new(RouteTable::slate_default())
    }

    /// Decides a navigation request.
    ///
    /// `authenticated` is token presence; `role` is the current derived
    /// role (absent when the token carries no recognizable role claim).
    /// Routes absent from the table require authentication but no
    /// particular role.
    pub fn decide(&self, path: &str, authenticated: bool, role: Option<Role>) -> RouteDecision {
        let access = self
            .table
            .rule_for(path)
            .map(|r| &r.access)
            .unwrap_or(&RouteAccess::Authenticated);

        if *access == RouteAccess::Public {
            return RouteDecision::Render;
        }

        // Gate 1: authenticated?
        if !authenticated {
            return RouteDecision::redirect(LOGIN_ROUTE);
        }

        // Gate 2: authorized?
        if let RouteAccess::Roles(allowed) = access {
            let permitted = role.is_some_and(|r| allowed.contains(&r));
            if !permitted {
                let landing = role.map(|r| r.default_route()).unwrap_or(DASHBOARD_ROUTE);
                return RouteDecision::redirect(landing);
            }
        }

        RouteDecision::Render
    }
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::slate_default()
    }
}

// =============================================================================
// Tests
// =============================================================================
