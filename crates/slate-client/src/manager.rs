// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The session manager.
//!
//! Constructed once at application start and passed by reference to
//! consumers. Owns the API client and the shared session state; the
//! session store is an injected collaborator.

use std::sync::Arc;

use slate_core::{Role, UserProfile};

use crate::api::{ApiClient, ClientConfig};
use crate::error::{ClientError, ClientResult};
use crate::guard::{RouteDecision, RouteGuard};
use crate::session::{ChatTurn, SessionState, StoredSession};
use crate::storage::SessionStore;
use crate::token;

/// Login credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
}

impl Credentials {
    /// Creates credentials.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

// =============================================================================
// SessionManager
// =============================================================================

/// The application's session manager.
///
/// Rehydrates the session from the injected store on construction (a
/// restart does not force a re-login), performs login/logout, derives the
/// current role and answers route-guard queries.
pub struct SessionManager {
    state: Arc<SessionState>,
    api: ApiClient,
    guard: RouteGuard,
}

impl SessionManager {
    /// Creates a session manager over the given store.
    ///
    /// The session is rehydrated synchronously from the store before this
    /// returns.
    pub fn new(config: ClientConfig, store: Arc<dyn SessionStore>) -> ClientResult<Self> {
        let state = Arc::new(SessionState::rehydrate(store)?);
        let api = ApiClient::new(config, state.clone())?;

        Ok(Self {
            state,
            api,
            guard: RouteGuard::slate_default(),
        })
    }

    /// Replaces the route guard (for applications with a custom table).
    pub fn with_guard(mut self, guard: RouteGuard) -> Self {
        self.guard = guard;
        self
    }

    // =========================================================================
    // Session operations
    // =========================================================================

    /// Logs in against the backend.
    ///
    /// A single round-trip with no retry. On success the returned token is
    /// decoded, the profile derived from its claims, and both persisted.
    /// On failure the error carries the backend's message when it sent
    /// one.
    pub async fn login(&self, credentials: &Credentials) -> ClientResult<UserProfile> {
        let token = self
            .api
            .login(&credentials.email, &credentials.password)
            .await
            .map_err(login_error)?;

        let mut profile = token::derive_profile(&token).unwrap_or(UserProfile {
            id: 0,
            email: String::new(),
            name: String::new(),
            username: String::new(),
            role: None,
        });
        // The login form knows the email even when the token omits it.
        if profile.email.is_empty() {
            profile.email = credentials.email.clone();
        }

        self.state.replace(StoredSession {
            token: Some(token),
            user: Some(profile.clone()),
        })?;

        tracing::info!(role = ?profile.role, "Logged in");
        Ok(profile)
    }

    /// Logs out: clears in-memory state and storage, including the chat
    /// transcript. No backend call; the token is stateless, there is
    /// nothing to revoke. Idempotent.
    pub fn logout(&self) -> ClientResult<()> {
        self.state.clear()
    }

    /// Returns `true` when a token is present.
    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    /// Returns the current user profile, if any.
    pub fn user(&self) -> Option<UserProfile> {
        self.state.user()
    }

    /// Returns the current token, if any.
    pub fn token(&self) -> Option<String> {
        self.state.token()
    }

    /// The current role: the profile's role when present, else re-decoded
    /// from the stored token on every read.
    pub fn role(&self) -> Option<Role> {
        self.state.role()
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Decides a navigation request against the current session.
    ///
    /// Recomputed on every call; nothing is cached.
    pub fn decide_route(&self, path: &str) -> RouteDecision {
        self.guard
            .decide(path, self.is_authenticated(), self.role())
    }

    // =========================================================================
    // Chat
    // =========================================================================

    /// Sends a chat message, appending both turns to the cached
    /// transcript.
    pub async fn chat(&self, message: &str) -> ClientResult<String> {
        let reply = self.api.chat(message).await?;

        let mut transcript = self.state.store().load_transcript()?;
        transcript.push(ChatTurn::user(message));
        transcript.push(ChatTurn::assistant(&reply));
        self.state.store().save_transcript(&transcript)?;

        Ok(reply)
    }

    /// Returns the cached chat transcript.
    pub fn chat_transcript(&self) -> ClientResult<Vec<ChatTurn>> {
        self.state.store().load_transcript()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the API client.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Returns the shared session state.
    pub fn state(&self) -> &Arc<SessionState> {
        &self.state
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("authenticated", &self.is_authenticated())
            .field("role", &self.role())
            .finish()
    }
}

/// Shapes a login failure for display.
///
/// The backend's message is kept verbatim; only a messageless transport
/// failure falls back to generic wording.
fn login_error(err: ClientError) -> ClientError {
    match err {
        ClientError::Api { status, message } if !message.is_empty() => {
            ClientError::Api { status, message }
        }
        ClientError::Timeout | ClientError::Connection(_) => err,
        _ => ClientError::api(0, "Login failed"),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemorySessionStore;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    fn token_with_payload(payload: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
        format!("{}.{}.sig", header, body)
    }

    fn manager_with_store(store: Arc<dyn SessionStore>) -> SessionManager {
        SessionManager::new(ClientConfig::default(), store).unwrap()
    }

    #[test]
    fn test_fresh_manager_is_logged_out() {
        let manager = manager_with_store(Arc::new(MemorySessionStore::new()));

        assert!(!manager.is_authenticated());
        assert_eq!(manager.role(), None);
        assert!(manager.user().is_none());
    }

    #[test]
    fn test_rehydration_restores_session_without_network() {
        let store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
        let token = token_with_payload(serde_json::json!({
            "sub": "4", "name": "Dana Okafor", "role": "admin"
        }));
        store
            .save(&StoredSession {
                token: Some(token),
                user: None,
            })
            .unwrap();

        let manager = manager_with_store(store);

        assert!(manager.is_authenticated());
        assert_eq!(manager.role(), Some(Role::Admin));
        assert_eq!(manager.user().unwrap().name, "Dana Okafor");
    }

    #[test]
    fn test_logout_clears_everything_idempotently() {
        let store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
        store
            .save(&StoredSession {
                token: Some(token_with_payload(serde_json::json!({"role": "student"}))),
                user: None,
            })
            .unwrap();
        store.save_transcript(&[ChatTurn::user("hi")]).unwrap();

        let manager = manager_with_store(store);
        assert!(manager.is_authenticated());

        manager.logout().unwrap();
        manager.logout().unwrap();

        assert!(!manager.is_authenticated());
        assert!(manager.user().is_none());
        assert!(manager.chat_transcript().unwrap().is_empty());
        assert!(manager.state().store().load().unwrap().token.is_none());
    }

    #[test]
    fn test_route_decisions_follow_session() {
        let manager = manager_with_store(Arc::new(MemorySessionStore::new()));
        assert_eq!(
            manager.decide_route("/dashboard"),
            RouteDecision::Redirect("/login".to_string())
        );

        let token = token_with_payload(serde_json::json!({"role": "teacher"}));
        manager
            .state()
            .replace(StoredSession {
                user: token::derive_profile(&token),
                token: Some(token),
            })
            .unwrap();

        assert_eq!(manager.decide_route("/teacher/results"), RouteDecision::Render);
        assert_eq!(
            manager.decide_route("/admin/students"),
            RouteDecision::Redirect("/teacher".to_string())
        );
    }

    #[test]
    fn test_login_error_keeps_backend_message() {
        let shaped = login_error(ClientError::api(401, "Invalid credentials"));
        assert_eq!(shaped.to_string(), "Invalid credentials");

        let shaped = login_error(ClientError::api(500, ""));
        assert_eq!(shaped.to_string(), "Login failed");

        assert!(login_error(ClientError::Timeout).is_transient());
    }
}
