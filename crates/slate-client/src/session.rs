// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Shared session state.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use slate_core::{Role, UserProfile};

use crate::error::{ClientError, ClientResult};
use crate::storage::SessionStore;
use crate::token;

// =============================================================================
// StoredSession
// =============================================================================

/// The persisted session: a bearer token and the profile derived from it.
///
/// Invariant (best-effort): `user` is present iff `token` is present. The
/// store tolerates partial sessions on load; the manager re-derives the
/// profile from the token on rehydration, which repairs most mismatches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    /// The bearer token, when logged in.
    pub token: Option<String>,
    /// The user profile derived from the token.
    pub user: Option<UserProfile>,
}

impl StoredSession {
    /// An empty (logged-out) session.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns `true` when a token is present.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

// =============================================================================
// Chat transcript
// =============================================================================

/// Who produced a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    /// The human user.
    User,
    /// The assistant.
    Assistant,
}

/// One turn of the chat transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Who spoke.
    pub speaker: Speaker,
    /// What was said.
    pub text: String,
}

impl ChatTurn {
    /// A user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    /// An assistant turn.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
        }
    }
}

// =============================================================================
// SessionState
// =============================================================================

/// In-memory session state shared between the manager and the API client,
/// with persistence delegated to the injected store.
pub struct SessionState {
    current: RwLock<StoredSession>,
    store: Arc<dyn SessionStore>,
}

impl SessionState {
    /// Creates session state over the given store, rehydrating the session
    /// synchronously so a restart does not force a re-login.
    ///
    /// The profile is always re-derived from the stored token, so stale or
    /// partial stored profiles heal on load. The repaired session is
    /// written back.
    pub fn rehydrate(store: Arc<dyn SessionStore>) -> ClientResult<Self> {
        let mut session = store.load()?;

        if let Some(token) = &session.token {
            session.user = token::derive_profile(token);
            store.save(&session)?;
        } else {
            // A profile without a token is not a session.
            session.user = None;
        }

        Ok(Self {
            current: RwLock::new(session),
            store,
        })
    }

    /// Returns a copy of the current session.
    pub fn snapshot(&self) -> StoredSession {
        self.current
            .read()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    /// Returns the current token, if any.
    pub fn token(&self) -> Option<String> {
        self.current.read().ok().and_then(|s| s.token.clone())
    }

    /// Returns the current user profile, if any.
    pub fn user(&self) -> Option<UserProfile> {
        self.current.read().ok().and_then(|s| s.user.clone())
    }

    /// Returns `true` when a token is present.
    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .map(|s| s.is_authenticated())
            .unwrap_or(false)
    }

    /// The current role: the profile's role when present, else re-decoded
    /// from the token on every read. The role is never cached separately
    /// from the token.
    pub fn role(&self) -> Option<Role> {
        let session = self.snapshot();
        session
            .user
            .as_ref()
            .and_then(|u| u.role)
            .or_else(|| session.token.as_deref().and_then(token::role_from_token))
    }

    /// Replaces the session, persisting it.
    pub fn replace(&self, session: StoredSession) -> ClientResult<()> {
        self.store.save(&session)?;
        let mut current = self
            .current
            .write()
            .map_err(|_| ClientError::Storage("session lock poisoned".to_string()))?;
        *current = session;
        Ok(())
    }

    /// Clears the session from memory and storage. Idempotent.
    pub fn clear(&self) -> ClientResult<()> {
        self.store.clear()?;
        let mut current = self
            .current
            .write()
            .map_err(|_| ClientError::Storage("session lock poisoned".to_string()))?;
        *current = StoredSession::empty();
        Ok(())
    }

    /// Clears without surfacing storage failures.
    ///
    /// Used on the 401/422 path, where the session is already dead and the
    /// caller needs the expiry error, not a storage error.
    pub fn clear_best_effort(&self) {
        if let Err(e) = self.clear() {
            tracing::warn!(error = %e, "Failed to clear session after auth failure");
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("authenticated", &self.is_authenticated())
            .finish()
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

    #[test]
    fn test_rehydrate_empty_store() {
        let store = Arc::new(MemorySessionStore::new());
        let state = SessionState::rehydrate(store).unwrap();

        assert!(!state.is_authenticated());
        assert_eq!(state.role(), None);
    }

    #[test]
    fn test_rehydrate_rederives_profile() {
        let token = token_with_payload(serde_json::json!({
            "sub": "9", "name": "Dana", "role": "teacher"
        }));
        let store = Arc::new(MemorySessionStore::new());
        store
            .save(&StoredSession {
                token: Some(token),
                // Deliberately stale profile.
                user: None,
            })
            .unwrap();

        let state = SessionState::rehydrate(store).unwrap();

        assert!(state.is_authenticated());
        let user = state.user().unwrap();
        assert_eq!(user.id, 9);
        assert_eq!(user.name, "Dana");
        assert_eq!(state.role(), Some(slate_core::Role::Teacher));
    }

    #[test]
    fn test_orphan_profile_is_dropped() {
        let store = Arc::new(MemorySessionStore::new());
        store
            .save(&StoredSession {
                token: None,
                user: Some(slate_core::UserProfile {
                    id: 1,
                    email: String::new(),
                    name: String::new(),
                    username: String::new(),
                    role: None,
                }),
            })
            .unwrap();

        let state = SessionState::rehydrate(store).unwrap();
        assert!(state.user().is_none());
    }

    #[test]
    fn test_role_falls_back_to_token_decode() {
        let token = token_with_payload(serde_json::json!({"user_type": "admin"}));
        let store = Arc::new(MemorySessionStore::new());
        let state = SessionState::rehydrate(store).unwrap();

        let mut session = StoredSession {
            token: Some(token),
            user: None,
        };
        // Simulate a profile whose role claim was unrecognized.
        session.user = Some(slate_core::UserProfile {
            id: 1,
            email: String::new(),
            name: String::new(),
            username: String::new(),
            role: None,
        });
        state.replace(session).unwrap();

        assert_eq!(state.role(), Some(slate_core::Role::Admin));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let store = Arc::new(MemorySessionStore::new());
        let state = SessionState::rehydrate(store).unwrap();

        state
            .replace(StoredSession {
                token: Some("t".to_string()),
                user: None,
            })
            .unwrap();
        assert!(state.is_authenticated());

        state.clear().unwrap();
        state.clear().unwrap();
        assert!(!state.is_authenticated());
        assert!(state.store().load().unwrap().token.is_none());
    }
}
