// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Per-endpoint response normalization.
//!
//! Backends serving this client have shipped three response shapes over
//! time: the platform envelope `{success, data, error, meta}`, a bare
//! payload, and a legacy wrapper keyed by entity name (`{"students":
//! [...]}`). Each normalization function documents exactly which shapes an
//! endpoint family accepts; anything else is a `ClientError::
//! UnexpectedShape`, never a silent empty result.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ClientError, ClientResult};

/// Normalizes a list endpoint response.
///
/// Accepted shapes, in probe order:
/// 1. the envelope: `{"success": true, "data": [...]}`;
/// 2. a bare array: `[...]`;
/// 3. the legacy wrapper: `{"<key>": [...]}`.
///
/// An envelope with `success: false` surfaces its error message.
pub fn entity_list<T: DeserializeOwned>(
    endpoint: &str,
    key: &str,
    value: Value,
) -> ClientResult<Vec<T>> {
    let items = match locate_payload(endpoint, key, value)? {
        Value::Array(items) => items,
        other => {
            return Err(ClientError::unexpected_shape(
                endpoint,
                format!("expected an array, found {}", kind_of(&other)),
            ))
        }
    };

    items
        .into_iter()
        .map(|item| {
            serde_json::from_value(item)
                .map_err(|e| ClientError::unexpected_shape(endpoint, e.to_string()))
        })
        .collect()
}

/// Normalizes a single-entity endpoint response.
///
/// Accepted shapes, in probe order:
/// 1. the envelope: `{"success": true, "data": {...}}`;
/// 2. the legacy wrapper: `{"<key>": {...}}`;
/// 3. a bare object.
pub fn entity<T: DeserializeOwned>(endpoint: &str, key: &str, value: Value) -> ClientResult<T> {
    let payload = locate_payload(endpoint, key, value)?;
    serde_json::from_value(payload)
        .map_err(|e| ClientError::unexpected_shape(endpoint, e.to_string()))
}

/// Normalizes the login response down to the token.
///
/// Accepted shapes: a top-level `token` string, or the envelope with
/// `data.token`.
pub fn auth_token(endpoint: &str, value: Value) -> ClientResult<String> {
    if let Some(token) = value.get("token").and_then(|v| v.as_str()) {
        return Ok(token.to_string());
    }
    if let Some(token) = value
        .get("data")
        .and_then(|d| d.get("token"))
        .and_then(|v| v.as_str())
    {
        return Ok(token.to_string());
    }

    Err(ClientError::unexpected_shape(
        endpoint,
        "response carried no token field",
    ))
}

/// Normalizes a chat response down to the assistant's message.
///
/// Accepted shapes: the envelope with `data.reply`, or a top-level
/// `reply`, `message` or `response` string.
pub fn chat_reply(endpoint: &str, value: Value) -> ClientResult<String> {
    if let Some(reply) = value
        .get("data")
        .and_then(|d| d.get("reply"))
        .and_then(|v| v.as_str())
    {
        return Ok(reply.to_string());
    }
    for field in ["reply", "message", "response"] {
        if let Some(reply) = value.get(field).and_then(|v| v.as_str()) {
            return Ok(reply.to_string());
        }
    }

    Err(ClientError::unexpected_shape(
        endpoint,
        "response carried no assistant message",
    ))
}

// =============================================================================
// Helpers
// =============================================================================

/// Finds the payload within a response, probing the documented shapes.
fn locate_payload(endpoint: &str, key: &str, value: Value) -> ClientResult<Value> {
    match value {
        Value::Array(items) => Ok(Value::Array(items)),
        Value::Object(mut map) => {
            // The envelope is identified by its `success` discriminator.
            if let Some(success) = map.get("success").and_then(|v| v.as_bool()) {
                if !success {
                    let message = map
                        .get("error")
                        .and_then(|v| v.as_str())
                        .unwrap_or("Operation failed")
                        .to_string();
                    return Err(ClientError::api(200, message));
                }
                return map.remove("data").ok_or_else(|| {
                    ClientError::unexpected_shape(endpoint, "envelope carried no data field")
                });
            }

            // Legacy wrapper keyed by entity name.
            if let Some(inner) = map.remove(key) {
                return Ok(inner);
            }

            // Bare object.
            Ok(Value::Object(map))
        }
        other => Err(ClientError::unexpected_shape(
            endpoint,
            format!("expected an object or array, found {}", kind_of(&other)),
        )),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use slate_core::Student;

    fn student_json() -> Value {
        json!({
            "id": 1,
            "name": "Mina Park",
            "username": "mina",
            "email": "mina@school.example",
            "section": "A1",
        })
    }

    #[test]
    fn test_list_accepts_envelope() {
        let value = json!({"success": true, "data": [student_json()]});
        let students: Vec<Student> = entity_list("/students", "students", value).unwrap();
        assert_eq!(students.len(), 1);
    }

    #[test]
    fn test_list_accepts_bare_array() {
        let value = json!([student_json()]);
        let students: Vec<Student> = entity_list("/students", "students", value).unwrap();
        assert_eq!(students.len(), 1);
    }

    #[test]
    fn test_list_accepts_legacy_wrapper() {
        let value = json!({"students": [student_json()]});
        let students: Vec<Student> = entity_list("/students", "students", value).unwrap();
        assert_eq!(students.len(), 1);
    }

    #[test]
    fn test_list_rejects_unknown_wrapper() {
        // A wrapper under the wrong key is a defined error, not an empty
        // list.
        let value = json!({"pupils": [student_json()]});
        let result: ClientResult<Vec<Student>> = entity_list("/students", "students", value);
        assert!(matches!(
            result,
            Err(ClientError::UnexpectedShape { .. })
        ));
    }

    #[test]
    fn test_list_rejects_scalar() {
        let result: ClientResult<Vec<Student>> = entity_list("/students", "students", json!(7));
        assert!(matches!(result, Err(ClientError::UnexpectedShape { .. })));
    }

    #[test]
    fn test_failed_envelope_surfaces_error() {
        let value = json!({"success": false, "error": "no students found"});
        let result: ClientResult<Vec<Student>> = entity_list("/students", "students", value);
        match result {
            Err(ClientError::Api { message, .. }) => assert_eq!(message, "no students found"),
            other => panic!("expected Api error, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_entity_accepts_wrapper_and_bare() {
        let wrapped = json!({"student": student_json()});
        let student: Student = entity("/students/1", "student", wrapped).unwrap();
        assert_eq!(student.id, 1);

        let bare: Student = entity("/students/1", "student", student_json()).unwrap();
        assert_eq!(bare.id, 1);
    }

    #[test]
    fn test_auth_token_shapes() {
        assert_eq!(
            auth_token("/login", json!({"token": "abc"})).unwrap(),
            "abc"
        );
        assert_eq!(
            auth_token("/login", json!({"success": true, "data": {"token": "xyz"}})).unwrap(),
            "xyz"
        );
        assert!(auth_token("/login", json!({"status": true})).is_err());
    }

    #[test]
    fn test_chat_reply_shapes() {
        assert_eq!(
            chat_reply("/chat", json!({"data": {"reply": "hello"}})).unwrap(),
            "hello"
        );
        assert_eq!(
            chat_reply("/chat", json!({"message": "hi"})).unwrap(),
            "hi"
        );
        assert!(chat_reply("/chat", json!({})).is_err());
    }
}
