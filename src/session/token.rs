// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Token store implementations

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

/// Source of the bearer token attached to outgoing requests
pub trait TokenStore: Send + Sync {
    /// Current token, if logged in
    fn get_token(&self) -> Option<String>;

    /// Store a new token
    fn set_token(&self, token: String);

    /// Forget the token
    fn remove_token(&self);
}

/// In-memory token store
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding a token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get_token(&self) -> Option<String> {
        self.token.read().clone()
    }

    fn set_token(&self, token: String) {
        *self.token.write() = Some(token);
    }

    fn remove_token(&self) {
        self.token.write().take();
    }
}

/// Token persisted in a single file
///
/// Read errors count as "no token"; write errors are logged.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn get_token(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                (!token.is_empty()).then(|| token.to_string())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read token file");
                None
            }
        }
    }

    fn set_token(&self, token: String) {
        if let Err(e) = fs::write(&self.path, token) {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to write token file");
        }
    }

    fn remove_token(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "Token file removed"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to remove token file")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let store = MemoryTokenStore::new();
        assert!(store.get_token().is_none());

        store.set_token("abc".to_string());
        assert_eq!(store.get_token().as_deref(), Some("abc"));

        store.remove_token();
        assert!(store.get_token().is_none());
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("token"));

        assert!(store.get_token().is_none());

        store.set_token("eyJhbGciOi".to_string());
        assert_eq!(store.get_token().as_deref(), Some("eyJhbGciOi"));

        store.remove_token();
        assert!(!store.path().exists());
        assert!(store.get_token().is_none());

        // removing twice is harmless
        store.remove_token();
    }

    #[test]
    fn test_file_store_trims_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        fs::write(&path, "  tok\n").unwrap();

        let store = FileTokenStore::new(&path);
        assert_eq!(store.get_token().as_deref(), Some("tok"));

        fs::write(&path, "\n").unwrap();
        assert!(store.get_token().is_none());
    }
}
