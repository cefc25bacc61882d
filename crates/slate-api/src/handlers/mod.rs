// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Request handlers.
//!
//! Reads are open to any authenticated caller; writes are gated to the role
//! that owns the resource. Handlers enforce the role themselves (the
//! admin-only directory group is additionally gated by `RoleLayer` at the
//! router).

pub mod admins;
pub mod announcements;
pub mod assignments;
pub mod attendance;
pub mod auth;
pub mod chat;
pub mod courses;
pub mod enrollments;
pub mod events;
pub mod health;
pub mod results;
pub mod sections;
pub mod students;
pub mod subjects;
pub mod submissions;
pub mod teachers;

use slate_core::Role;

use crate::auth::AuthContext;
use crate::error::{ApiError, ApiResult};

/// Rejects callers whose role is not in the allowed set.
pub(crate) fn require_role(ctx: &AuthContext, allowed: &[Role]) -> ApiResult<()> {
    if ctx.has_any_role(allowed) {
        Ok(())
    } else {
        Err(ApiError::forbidden("Insufficient permissions"))
    }
}

/// Rejects blank required fields with a uniform message.
pub(crate) fn require_field(value: &str, field: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        Err(ApiError::validation(format!("{} is required", field)))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Claims;

    #[test]
    fn test_require_role() {
        let ctx = AuthContext::from_claims(&Claims::new(1, Role::Teacher, 3600));

        assert!(require_role(&ctx, &[Role::Teacher]).is_ok());
        assert!(require_role(&ctx, &[Role::Admin, Role::Teacher]).is_ok());
        assert!(require_role(&ctx, &[Role::Admin]).is_err());
    }

    #[test]
    fn test_require_field() {
        assert!(require_field("ok", "name").is_ok());
        assert!(require_field("", "name").is_err());
        assert!(require_field("   ", "name").is_err());
    }
}
