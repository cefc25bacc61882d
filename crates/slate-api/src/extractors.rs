// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Custom extractors for API handlers.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};

use crate::auth::AuthContext;
use crate::error::ApiError;

// =============================================================================
// Auth Extractor
// =============================================================================

/// Extractor for authenticated requests.
///
/// Extracts the `AuthContext` from the request extensions. Returns 401 if
/// the caller is not authenticated.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(Auth(ctx): Auth) -> impl IntoResponse {
///     format!("Hello, {}", ctx.user_id)
/// }
/// ```
pub struct Auth(pub AuthContext);

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .filter(|ctx| !ctx.is_anonymous())
            .map(Auth)
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}

// =============================================================================
// Pagination Extractor
// =============================================================================

/// Query parameters for pagination.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct PaginationParams {
    /// Page number (1-indexed).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

impl PaginationParams {
    /// Returns the offset into the result set.
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize) * self.per_page as usize
    }

    /// Returns the page size, capped at 100.
    pub fn limit(&self) -> usize {
        self.per_page.min(100) as usize
    }

    /// Validates the pagination parameters.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.page == 0 {
            return Err(ApiError::validation("Page must be greater than 0"));
        }
        if self.per_page == 0 || self.per_page > 100 {
            return Err(ApiError::validation("per_page must be between 1 and 100"));
        }
        Ok(())
    }

    /// Applies the pagination window to a full result set, returning the
    /// window and the total count.
    pub fn slice<T>(&self, mut items: Vec<T>) -> (Vec<T>, u64) {
        let total = items.len() as u64;
        let start = self.offset().min(items.len());
        let end = (start + self.limit()).min(items.len());
        let window = items.drain(start..end).collect();
        (window, total)
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 20,
        }
    }
}

/// Extractor for pagination parameters.
pub struct Pagination(pub PaginationParams);

impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid pagination parameters: {}", e)))?;

        params.validate()?;
        Ok(Pagination(params))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_params() {
        let params = PaginationParams {
            page: 2,
            per_page: 10,
        };

        assert_eq!(params.offset(), 10);
        assert_eq!(params.limit(), 10);
    }

    #[test]
    fn test_pagination_validation() {
        assert!(PaginationParams {
            page: 1,
            per_page: 20
        }
        .validate()
        .is_ok());
        assert!(PaginationParams {
            page: 0,
            per_page: 20
        }
        .validate()
        .is_err());
        assert!(PaginationParams {
            page: 1,
            per_page: 200
        }
        .validate()
        .is_err());
    }

    #[test]
    fn test_pagination_slice() {
        let params = PaginationParams {
            page: 2,
            per_page: 3,
        };
        let (window, total) = params.slice(vec![1, 2, 3, 4, 5, 6, 7]);

        assert_eq!(window, vec![4, 5, 6]);
        assert_eq!(total, 7);
    }

    #[test]
    fn test_pagination_slice_past_end() {
        let params = PaginationParams {
            page: 9,
            per_page: 10,
        };
        let (window, total) = params.slice(vec![1, 2, 3]);

        assert!(window.is_empty());
        assert_eq!(total, 3);
    }
}
