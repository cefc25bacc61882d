// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! HTTP middleware: JWT authentication and role-based access control.
//!
//! The two layers mirror the platform's two authorization gates, evaluated in
//! order on every request: is the caller authenticated, and is the caller's
//! role allowed here.

pub mod auth;
pub mod rbac;

pub use auth::{AuthLayer, AuthMiddleware};
pub use rbac::{RoleLayer, RoleMiddleware};
