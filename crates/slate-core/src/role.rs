// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The platform role enumeration.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

// =============================================================================
// Role
// =============================================================================

/// A platform role.
///
/// The role set is closed: every authenticated user is exactly one of
/// `admin`, `teacher` or `student`. The role determines which API operations
/// a user may perform and which routes a client may navigate to.
///
/// # Examples
///
/// ```
/// use slate_core::Role;
///
/// assert_eq!(Role::parse("Teacher"), Some(Role::Teacher));
/// assert_eq!(Role::parse("superadmin"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Manages the institution: people, sections, courses, subjects,
    /// enrollments and events.
    Admin,
    /// Manages teaching material: assignments, attendance, results,
    /// announcements and submission grading.
    Teacher,
    /// Consumes teaching material and submits assignment work.
    Student,
}

impl Role {
    /// All roles, in directory search order (admin first).
    pub fn all() -> [Role; 3] {
        [Role::Admin, Role::Teacher, Role::Student]
    }

    /// Returns the role name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }

    /// Parses a role from a string, case-insensitively.
    ///
    /// Only the three known role values are accepted; anything else is
    /// `None`. The set is intentionally strict: an unrecognized value must
    /// read as "no role", not as a best-effort guess.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "teacher" => Some(Role::Teacher),
            "student" => Some(Role::Student),
            _ => None,
        }
    }

    /// Returns the role's default landing route.
    ///
    /// Each role has a distinct landing page; clients redirect here when a
    /// navigation target is not permitted for the role.
    pub fn default_route(&self) -> &'static str {
        match self {
            Role::Admin => "/admin",
            Role::Teacher => "/teacher",
            Role::Student => "/student",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s).ok_or_else(|| ModelError::InvalidRole(s.to_string()))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_roles() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("TEACHER"), Some(Role::Teacher));
        assert_eq!(Role::parse("Student"), Some(Role::Student));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::parse("root"), None);
        assert_eq!(Role::parse("administrator"), None);
        assert_eq!(Role::parse("teacher "), None);
    }

    #[test]
    fn test_round_trip() {
        for role in Role::all() {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_default_routes_are_distinct() {
        let routes: std::collections::HashSet<_> =
            Role::all().iter().map(|r| r.default_route()).collect();
        assert_eq!(routes.len(), 3);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Role::Teacher).unwrap();
        assert_eq!(json, "\"teacher\"");

        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }
}
