// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Route navigation

use parking_lot::RwLock;

/// Route the session-expiry flow returns to
pub const ROOT_ROUTE: &str = "/";

/// Client-side router capability
pub trait Navigator: Send + Sync {
    /// Navigate to `path`
    fn push(&self, path: &str);
}

/// Router that records its history in memory
#[derive(Debug, Default)]
pub struct MemoryRouter {
    history: RwLock<Vec<String>>,
}

impl MemoryRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Router starting at `path`
    pub fn starting_at(path: impl Into<String>) -> Self {
        Self {
            history: RwLock::new(vec![path.into()]),
        }
    }

    /// Latest route, if any navigation happened
    pub fn current(&self) -> Option<String> {
        self.history.read().last().cloned()
    }

    /// All routes in visiting order
    pub fn history(&self) -> Vec<String> {
        self.history.read().clone()
    }
}

impl Navigator for MemoryRouter {
    fn push(&self, path: &str) {
        tracing::debug!(path, "Navigate");
        self.history.write().push(path.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_history() {
        let router = MemoryRouter::starting_at("/orders");
        assert_eq!(router.current().as_deref(), Some("/orders"));

        router.push(ROOT_ROUTE);
        assert_eq!(router.current().as_deref(), Some("/"));
        assert_eq!(router.history(), vec!["/orders".to_string(), "/".to_string()]);
    }

    #[test]
    fn test_empty_router() {
        assert!(MemoryRouter::new().current().is_none());
    }
}
