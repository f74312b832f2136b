//! Session marker
//!
//! The login flow stores the user identifier under a fixed key; its mere
//! presence means "authenticated". Stores are pluggable: [`MemoryStore`]
//! here, `localStorage` in the wasm crate.

use crate::guard::AuthContext;
use crate::{Error, Result};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Default storage key of the marker
pub const SESSION_KEY: &str = "identifier";

/// Key-value storage that outlives a navigation
pub trait SessionStore {
    /// Read a value
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// Write a value
    fn set(&self, key: &str, value: &str) -> Result<()>;
    /// Delete a value
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory store for tests and native hosts
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all entries
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().remove(key);
        Ok(())
    }
}

/// Presence-only marker under a fixed key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionMarker {
    key: String,
}

impl SessionMarker {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Snapshot the marker into an [`AuthContext`]
    ///
    /// A store that cannot be read counts as logged out.
    pub fn read(&self, store: &dyn SessionStore) -> AuthContext {
        match store.get(&self.key) {
            Ok(identifier) => AuthContext::from(identifier),
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "session marker unreadable");
                AuthContext::anonymous()
            }
        }
    }

    /// Store the identifier returned by the login flow
    pub fn login(&self, store: &dyn SessionStore, identifier: &str) -> Result<AuthContext> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(Error::InvalidIdentifier(identifier.to_string()));
        }
        store.set(&self.key, identifier)?;
        tracing::info!(key = %self.key, "session marker set");
        Ok(AuthContext::authenticated(identifier))
    }

    /// Clear the marker
    pub fn logout(&self, store: &dyn SessionStore) -> Result<()> {
        store.remove(&self.key)?;
        tracing::info!(key = %self.key, "session marker cleared");
        Ok(())
    }
}

impl Default for SessionMarker {
    fn default() -> Self {
        Self::new(SESSION_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl SessionStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(Error::Storage("denied".into()))
        }
        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::Storage("quota".into()))
        }
        fn remove(&self, _key: &str) -> Result<()> {
            Err(Error::Storage("denied".into()))
        }
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap(), Some("1".to_string()));
        store.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        store.set("b", "2").unwrap();
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_marker_presence() {
        let store = MemoryStore::new();
        let marker = SessionMarker::default();
        assert_eq!(marker.key(), "identifier");
        assert!(!marker.read(&store).is_authenticated());

        store.set("identifier", "42").unwrap();
        let auth = marker.read(&store);
        assert!(auth.is_authenticated());
        assert_eq!(auth.identifier(), Some("42"));
    }

    #[test]
    fn test_any_value_counts() {
        let store = MemoryStore::new();
        store.set("identifier", "").unwrap();
        assert!(SessionMarker::default().read(&store).is_authenticated());
    }

    #[test]
    fn test_login_logout() {
        let store = MemoryStore::new();
        let marker = SessionMarker::new("token");

        let auth = marker.login(&store, " 7 ").unwrap();
        assert_eq!(auth.identifier(), Some("7"));
        assert_eq!(store.get("token").unwrap(), Some("7".to_string()));

        marker.logout(&store).unwrap();
        assert!(!marker.read(&store).is_authenticated());
    }

    #[test]
    fn test_login_rejects_empty_identifier() {
        let store = MemoryStore::new();
        assert!(matches!(
            SessionMarker::default().login(&store, "   "),
            Err(Error::InvalidIdentifier(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_unreadable_store_is_anonymous() {
        let marker = SessionMarker::default();
        assert_eq!(marker.read(&BrokenStore), AuthContext::anonymous());
        assert_eq!(
            marker.login(&BrokenStore, "1"),
            Err(Error::Storage("quota".to_string()))
        );
    }
}
