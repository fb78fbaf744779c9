//! Durable key/value storage for client-side records.
//!
//! SYSTEM CONTEXT
//! ==============
//! `BrowserStorage` wraps `window.localStorage` and is the only medium the
//! product persists to. Outside the browser (native tests, storage disabled by
//! the user agent) every call is a silent no-op. `MemoryStorage` is the
//! in-process stand-in used by tests and native callers.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// String key/value store with whole-value replace semantics.
pub trait Storage {
    /// Read the value stored under `key`.
    fn get_item(&self, key: &str) -> Option<String>;
    /// Replace the value stored under `key`.
    fn set_item(&self, key: &str, value: &str);
    /// Remove `key`; removing a missing key does nothing.
    fn remove_item(&self, key: &str);
}

/// `window.localStorage`, resolved on every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    #[cfg(feature = "csr")]
    fn local() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }

    /// Whether a storage medium is reachable from this execution context.
    #[cfg(test)]
    pub(crate) fn is_available() -> bool {
        #[cfg(feature = "csr")]
        {
            Self::local().is_some()
        }
        #[cfg(not(feature = "csr"))]
        {
            false
        }
    }
}

impl Storage for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            Self::local()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            tracing::trace!(key, "no browser storage; read skipped");
            None
        }
    }

    fn set_item(&self, key: &str, value: &str) {
        #[cfg(feature = "csr")]
        {
            let Some(storage) = Self::local() else {
                return;
            };
            if let Err(err) = storage.set_item(key, value) {
                tracing::warn!(key, error = ?err, "localStorage write rejected");
            }
        }
        #[cfg(not(feature = "csr"))]
        tracing::trace!(key, bytes = value.len(), "no browser storage; write skipped");
    }

    fn remove_item(&self, key: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = Self::local() {
                if let Err(err) = storage.remove_item(key) {
                    tracing::warn!(key, error = ?err, "localStorage remove rejected");
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        tracing::trace!(key, "no browser storage; remove skipped");
    }
}

/// Shared in-memory storage. Clones observe the same entries.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove_item(&self, key: &str) {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}
