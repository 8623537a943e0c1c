//! Tab-scoped key/value storage for the admin session marker.

use dashmap::DashMap;

/// Key under which the admin session marker is stored.
pub const SESSION_KEY: &str = "kaze_auth";
pub const SESSION_ACTIVE: &str = "true";

/// Storage whose contents live exactly as long as the browsing session
/// that owns it. Nothing written here survives a restart.
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    entries: DashMap<String, String>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ends the session scope: every stored value is dropped.
    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl SessionStorage for MemorySessionStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.remove(key);
    }
}

/// Whether the stored marker says an admin session is active.
pub fn is_marked_active(storage: &dyn SessionStorage) -> bool {
    storage.get(SESSION_KEY).as_deref() == Some(SESSION_ACTIVE)
}
