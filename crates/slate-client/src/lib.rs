// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # slate-client
//!
//! Session core and typed API client for the SLATE learning management
//! platform.
//!
//! The crate is organized around an explicit session manager constructed
//! once at application start and passed by reference to consumers:
//!
//! - **token**: unverified JWT payload decoding and role extraction
//! - **storage**: the durable session store (an injected collaborator)
//! - **session**: shared session state
//! - **manager**: login/logout, role derivation, rehydration
//! - **guard**: route access decisions (authenticated? authorized?)
//! - **api**: the typed HTTP client with per-endpoint response
//!   normalization
//!
//! The token codec never verifies signatures; the server rejects tampered
//! tokens on each call, which the client observes as a 401/422 and treats
//! as the end of the session.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod error;
pub mod guard;
pub mod manager;
pub mod normalize;
pub mod session;
pub mod storage;
pub mod token;

pub use api::{ApiClient, ClientConfig, Overview};
pub use error::{ClientError, ClientResult};
pub use guard::{RouteAccess, RouteDecision, RouteGuard, RouteTable};
pub use manager::{Credentials, SessionManager};
pub use session::{ChatTurn, SessionState, Speaker, StoredSession};
pub use storage::{FileSessionStore, MemorySessionStore, SessionStore};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
