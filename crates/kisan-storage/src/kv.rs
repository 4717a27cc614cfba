//! The key-value substrate port.
//!
//! Values are opaque serialized blobs addressed by string key. There are no
//! transactions: each call stands alone, and any caller may touch any key.

use std::collections::HashMap;
use std::sync::Mutex;

use kisan_core::error::{KisanError, Result};

/// String-keyed get/set/remove of serialized values.
///
/// Implementations are synchronous and expected to be local and fast.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Process-local store backed by a `HashMap`. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|e| KisanError::Storage(format!("Memory store lock poisoned: {}", e)))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_get_missing() {
        let store = MemoryStore::new();
        assert_eq!(store.get("nothing").unwrap(), None);
    }

    #[test]
    fn test_memory_store_set_then_get() {
        let store = MemoryStore::new();
        store.set("k", "[1,2]").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("[1,2]"));
    }

    #[test]
    fn test_memory_store_overwrite() {
        let store = MemoryStore::new();
        store.set("k", "a").unwrap();
        store.set("k", "b").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("b"));
    }

    #[test]
    fn test_memory_store_remove_is_idempotent() {
        let store = MemoryStore::new();
        store.set("k", "a").unwrap();
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }
}
