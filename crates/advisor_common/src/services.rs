// --- File: crates/advisor_common/src/services.rs ---
//! Service abstractions for per-browser storage.
//!
//! The session token and the user profile live in a key/value store with
//! local-storage semantics. The trait keeps the API client and the guard independent
//! of where that store lives; `MemorySessionStore` backs each browser in the web
//! service and doubles as the fake in tests.

use parking_lot::Mutex;
use std::collections::HashMap;

/// Storage key of the raw bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key of the JSON-serialised user profile.
pub const PROFILE_KEY: &str = "userProfile";

/// A trait for string key/value storage scoped to one browser.
pub trait SessionStore: Send + Sync {
    /// Returns the stored value, if any.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str);

    /// Removes the value stored under `key`. Removing a missing key is a no-op.
    fn remove_item(&self, key: &str);
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

impl SessionStore for MemorySessionStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items.lock().insert(key.to_string(), value.to_string());
    }

    fn remove_item(&self, key: &str) {
        self.items.lock().remove(key);
    }
}
