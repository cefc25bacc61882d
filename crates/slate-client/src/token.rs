// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Unverified JWT payload decoding.
//!
//! The client derives the user entirely from the token it was handed at
//! login; there is no profile endpoint. Decoding is deliberately
//! best-effort and never verifies the signature. A tampered token buys an
//! attacker nothing beyond a different menu, since the server re-checks the
//! real signature on every API call.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::{Map, Value};
use slate_core::{Role, UserProfile};

/// Claim fields probed for the role, in order.
///
/// Backends have shipped the role under several names over time.
const ROLE_CLAIM_FIELDS: [&str; 4] = ["role", "user_type", "type", "user_role"];

/// Decodes a JWT payload without verifying the signature.
///
/// Splits on `.`, base64url-decodes the middle segment and parses it as a
/// JSON object. Any failure at any step yields `None`; this function never
/// panics and never returns an error.
pub fn decode_payload(token: &str) -> Option<Map<String, Value>> {
    let payload = token.split('.').nth(1)?;
    // Tolerate both padded and unpadded encodings.
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let value: Value = serde_json::from_slice(&bytes).ok()?;
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// Extracts the role claim from a token.
///
/// Probes the known claim fields in order, lowercases the value and
/// accepts only the three known roles. Anything else is "no role".
pub fn role_from_token(token: &str) -> Option<Role> {
    let claims = decode_payload(token)?;

    for field in ROLE_CLAIM_FIELDS {
        if let Some(value) = claims.get(field).and_then(|v| v.as_str()) {
            if let Some(role) = Role::parse(value) {
                return Some(role);
            }
        }
    }

    None
}

/// Derives a user profile from a token's claims.
///
/// Follows the original fallback chains: the id is taken from `sub`, `id`
/// or `user_id` (zero when absent or non-numeric), the display name from
/// `name` or `username`, the login name from `username` or `email`.
pub fn derive_profile(token: &str) -> Option<UserProfile> {
    let claims = decode_payload(token)?;

    let id = ["sub", "id", "user_id"]
        .iter()
        .find_map(|field| claim_i64(&claims, field))
        .unwrap_or(0);

    let email = claim_str(&claims, "email").unwrap_or_default();
    let username = claim_str(&claims, "username")
        .or_else(|| claim_str(&claims, "email"))
        .unwrap_or_default();
    let name = claim_str(&claims, "name")
        .or_else(|| claim_str(&claims, "username"))
        .unwrap_or_default();

    Some(UserProfile {
        id,
        email,
        name,
        username,
        role: role_from_token(token),
    })
}

fn claim_str(claims: &Map<String, Value>, field: &str) -> Option<String> {
    claims
        .get(field)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

fn claim_i64(claims: &Map<String, Value>, field: &str) -> Option<i64> {
    match claims.get(field)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds an unsigned token around the given JSON payload.
    fn token_with_payload(payload: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
        format!("{}.{}.signature", header, body)
    }

    #[test]
    fn test_decode_round_trip() {
        let token = token_with_payload(serde_json::json!({"sub": "42", "role": "teacher"}));
        let claims = decode_payload(&token).unwrap();

        assert_eq!(claims.get("sub").and_then(|v| v.as_str()), Some("42"));
    }

    #[test]
    fn test_malformed_tokens_decode_to_none() {
        for token in [
            "",
            "not-a-token",
            "one.segment",
            "a.!!!not-base64!!!.c",
            "a.bm90IGpzb24.c", // "not json"
            "a.WyJhcnJheSJd.c", // a JSON array, not an object
        ] {
            assert!(decode_payload(token).is_none(), "token {:?}", token);
        }
    }

    #[test]
    fn test_role_extraction_field_order() {
        let token = token_with_payload(serde_json::json!({"role": "teacher"}));
        assert_eq!(role_from_token(&token), Some(Role::Teacher));

        let token = token_with_payload(serde_json::json!({"user_type": "ADMIN"}));
        assert_eq!(role_from_token(&token), Some(Role::Admin));

        let token = token_with_payload(serde_json::json!({"type": "Student"}));
        assert_eq!(role_from_token(&token), Some(Role::Student));

        let token = token_with_payload(serde_json::json!({"user_role": "student"}));
        assert_eq!(role_from_token(&token), Some(Role::Student));
    }

    #[test]
    fn test_unknown_role_is_none() {
        let token = token_with_payload(serde_json::json!({"role": "superadmin"}));
        assert_eq!(role_from_token(&token), None);

        let token = token_with_payload(serde_json::json!({"sub": "1"}));
        assert_eq!(role_from_token(&token), None);

        assert_eq!(role_from_token("garbage"), None);
    }

    #[test]
    fn test_first_recognizable_field_wins() {
        // `role` is unusable, `user_type` carries the real role.
        let token = token_with_payload(serde_json::json!({"role": "wizard", "user_type": "teacher"}));
        assert_eq!(role_from_token(&token), Some(Role::Teacher));
    }

    #[test]
    fn test_derive_profile_fallback_chain() {
        let token = token_with_payload(serde_json::json!({
            "sub": "7",
            "email": "mina@school.example",
            "role": "student",
        }));
        let profile = derive_profile(&token).unwrap();

        assert_eq!(profile.id, 7);
        assert_eq!(profile.email, "mina@school.example");
        // No username claim: falls back to email.
        assert_eq!(profile.username, "mina@school.example");
        assert_eq!(profile.role, Some(Role::Student));
    }

    #[test]
    fn test_derive_profile_numeric_id_claim() {
        let token = token_with_payload(serde_json::json!({"id": 13, "username": "dana"}));
        let profile = derive_profile(&token).unwrap();

        assert_eq!(profile.id, 13);
        assert_eq!(profile.name, "dana");
        assert_eq!(profile.role, None);
    }

    #[test]
    fn test_derive_profile_defaults_id_to_zero() {
        let token = token_with_payload(serde_json::json!({"email": "x@y.example"}));
        assert_eq!(derive_profile(&token).unwrap().id, 0);
    }

    #[test]
    fn test_padded_payload_decodes() {
        let payload = URL_SAFE_NO_PAD.encode(br#"{"role":"admin"}"#);
        let token = format!("h.{}==.s", payload);
        assert_eq!(role_from_token(&token), Some(Role::Admin));
    }
}
