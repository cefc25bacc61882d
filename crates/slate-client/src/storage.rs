// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Durable session storage.
//!
//! Persistence is an injected collaborator: the session manager talks to
//! the `SessionStore` trait and never to the filesystem directly.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};
use crate::session::{ChatTurn, StoredSession};

// =============================================================================
// SessionStore Trait
// =============================================================================

/// Durable storage for the session and session-scoped derived state.
pub trait SessionStore: Send + Sync {
    /// Persists the session.
    fn save(&self, session: &StoredSession) -> ClientResult<()>;

    /// Loads the session.
    ///
    /// Absence of the token, the profile or the whole store reads as an
    /// empty session, never as an error.
    fn load(&self) -> ClientResult<StoredSession>;

    /// Removes the session and all session-scoped derived state (the chat
    /// transcript included). Idempotent.
    fn clear(&self) -> ClientResult<()>;

    /// Persists the chat transcript.
    fn save_transcript(&self, transcript: &[ChatTurn]) -> ClientResult<()>;

    /// Loads the chat transcript; absent reads as empty.
    fn load_transcript(&self) -> ClientResult<Vec<ChatTurn>>;
}

// =============================================================================
// File document
// =============================================================================

/// The on-disk document: session keys plus the transcript.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<slate_core::UserProfile>,
    #[serde(default)]
    transcript: Vec<ChatTurn>,
}

// =============================================================================
// FileSessionStore
// =============================================================================

/// File-backed session store: one JSON document on disk.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Creates a store over the given file path. The file is created on
    /// first save; a missing file reads as an empty session.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the document, treating a missing or unreadable file as empty.
    ///
    /// A malformed document also reads as empty: a corrupt session is "no
    /// session", never a surfaced error.
    fn read_document(&self) -> StoreDocument {
        match fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => StoreDocument::default(),
        }
    }

    fn write_document(&self, document: &StoreDocument) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| ClientError::Storage(e.to_string()))?;
            }
        }

        let content = serde_json::to_string_pretty(document)
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        fs::write(&self.path, content).map_err(|e| ClientError::Storage(e.to_string()))
    }
}

impl SessionStore for FileSessionStore {
    fn save(&self, session: &StoredSession) -> ClientResult<()> {
        let mut document = self.read_document();
        document.token = session.token.clone();
        document.user = session.user.clone();
        self.write_document(&document)
    }

    fn load(&self) -> ClientResult<StoredSession> {
        let document = self.read_document();
        Ok(StoredSession {
            token: document.token,
            user: document.user,
        })
    }

    fn clear(&self) -> ClientResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| ClientError::Storage(e.to_string()))?;
        }
        Ok(())
    }

    fn save_transcript(&self, transcript: &[ChatTurn]) -> ClientResult<()> {
        let mut document = self.read_document();
        document.transcript = transcript.to_vec();
        self.write_document(&document)
    }

    fn load_transcript(&self) -> ClientResult<Vec<ChatTurn>> {
        Ok(self.read_document().transcript)
    }
}

// =============================================================================
// MemorySessionStore
// =============================================================================

/// In-memory session store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemorySessionStore {
    document: RwLock<StoreDocument>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> ClientResult<StoreDocument> {
        self.document
            .read()
            .map(|d| d.clone())
            .map_err(|_| ClientError::Storage("store lock poisoned".to_string()))
    }

    fn mutate(&self, f: impl FnOnce(&mut StoreDocument)) -> ClientResult<()> {
        let mut document = self
            .document
            .write()
            .map_err(|_| ClientError::Storage("store lock poisoned".to_string()))?;
        f(&mut document);
        Ok(())
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, session: &StoredSession) -> ClientResult<()> {
        self.mutate(|d| {
            d.token = session.token.clone();
            d.user = session.user.clone();
        })
    }

    fn load(&self) -> ClientResult<StoredSession> {
        let document = self.read()?;
        Ok(StoredSession {
            token: document.token,
            user: document.user,
        })
    }

    fn clear(&self) -> ClientResult<()> {
        self.mutate(|d| *d = StoreDocument::default())
    }

    fn save_transcript(&self, transcript: &[ChatTurn]) -> ClientResult<()> {
        self.mutate(|d| d.transcript = transcript.to_vec())
    }

    fn load_transcript(&self) -> ClientResult<Vec<ChatTurn>> {
        Ok(self.read()?.transcript)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session() -> StoredSession {
        StoredSession {
            token: Some("header.payload.signature".to_string()),
            user: Some(slate_core::UserProfile {
                id: 5,
                email: "mina@school.example".to_string(),
                name: "Mina Park".to_string(),
                username: "mina".to_string(),
                role: Some(slate_core::Role::Student),
            }),
        }
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));

        store.save(&sample_session()).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, sample_session());
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("absent.json"));

        let loaded = store.load().unwrap();
        assert!(loaded.token.is_none());
        assert!(loaded.user.is_none());
    }

    #[test]
    fn test_file_store_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{ not json").unwrap();

        let store = FileSessionStore::new(&path);
        assert!(store.load().unwrap().token.is_none());
    }

    #[test]
    fn test_clear_removes_session_and_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));

        store.save(&sample_session()).unwrap();
        store
            .save_transcript(&[ChatTurn::user("hello"), ChatTurn::assistant("hi")])
            .unwrap();

        store.clear().unwrap();
        // Idempotent.
        store.clear().unwrap();

        assert!(store.load().unwrap().token.is_none());
        assert!(store.load_transcript().unwrap().is_empty());
    }

    #[test]
    fn test_transcript_survives_session_save() {
        let store = MemorySessionStore::new();
        store.save_transcript(&[ChatTurn::user("q")]).unwrap();
        store.save(&sample_session()).unwrap();

        assert_eq!(store.load_transcript().unwrap().len(), 1);
    }

    #[test]
    fn test_file_store_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested/dir/session.json"));

        store.save(&sample_session()).unwrap();
        assert!(store.load().unwrap().token.is_some());
    }
}
