// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # slate-api
//!
//! REST API server for the SLATE learning management platform.
//!
//! This crate provides the HTTP API with JWT authentication, role-based
//! authorization, per-entity CRUD endpoints and the chat proxy endpoint.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod server;
pub mod state;
pub mod store;

pub use auth::{AuthContext, Claims, JwtConfig, JwtManager};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use response::{ApiResponse, AuthResponse, ResponseMeta};
pub use server::{ApiServer, ApiServerBuilder};
pub use state::AppState;
pub use store::{memory::MemoryStore, Store};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
