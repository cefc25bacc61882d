// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Pre-built test data.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use slate_api::{auth::JwtConfig, config::BootstrapAdmin, ApiConfig};

/// The JWT secret used by all test servers.
pub const TEST_JWT_SECRET: &str = "test-secret-key-for-jwt-signing-must-be-32-chars-plus";

/// The bootstrap admin's email.
pub const ADMIN_EMAIL: &str = "root@school.example";

/// The bootstrap admin's password.
pub const ADMIN_PASSWORD: &str = "root-password-1";

/// The bootstrap admin's display name.
pub const ADMIN_NAME: &str = "Root Admin";

/// A test API configuration with the bootstrap admin configured.
pub fn test_api_config() -> ApiConfig {
    let mut config = ApiConfig::default();
    config.jwt = JwtConfig::new(TEST_JWT_SECRET);
    config.bootstrap_admin = Some(BootstrapAdmin {
        name: ADMIN_NAME.to_string(),
        username: "root".to_string(),
        email: ADMIN_EMAIL.to_string(),
        password: ADMIN_PASSWORD.to_string(),
    });
    config
}

/// Builds an unsigned token around the given JSON payload.
///
/// Suitable for exercising the client-side codec, which never verifies
/// signatures. Server-side tests need properly signed tokens; use the
/// harness login for those.
pub fn unsigned_token(payload: serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
    format!("{}.{}.unsigned", header, body)
}
