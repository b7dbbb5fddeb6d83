//! In-memory store with optional quota

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use super::{KeyValueStore, Result};
use crate::error::StorageError;

/// In-memory [`KeyValueStore`].
///
/// Usage is counted as key bytes plus value bytes, the way browsers account
/// local storage. With a quota set, a write that would push usage past it
/// fails with [`StorageError::QuotaExceeded`] and leaves the old value alone.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<BTreeMap<String, String>>,
    quota: Option<usize>,
    disabled: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects writes once `limit` bytes are in use
    pub fn with_quota(limit: usize) -> Self {
        Self {
            quota: Some(limit),
            ..Self::default()
        }
    }

    /// Make every operation fail with [`StorageError::Unavailable`], as when
    /// storage is blocked by browser settings.
    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::SeqCst);
    }

    /// Bytes currently in use
    pub fn usage(&self) -> usize {
        self.items
            .lock()
            .map(|items| items.iter().map(|(k, v)| k.len() + v.len()).sum())
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.items.lock().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_enabled(&self) -> Result<()> {
        if self.disabled.load(Ordering::SeqCst) {
            Err(StorageError::Unavailable)
        } else {
            Ok(())
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.items
            .lock()
            .map_err(|_| StorageError::Backend("memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.check_enabled()?;
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.check_enabled()?;
        let mut items = self.lock()?;

        if let Some(limit) = self.quota {
            let used: usize = items.iter().map(|(k, v)| k.len() + v.len()).sum();
            let replaced = items.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
            let needed = used - replaced + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded { needed, limit });
            }
        }

        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.check_enabled()?;
        self.lock()?.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        self.check_enabled()?;
        Ok(self.lock()?.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();
        store.set_item("k1", "v1").unwrap();

        assert_eq!(store.get_item("k1").unwrap(), Some("v1".to_string()));

        store.remove_item("k1").unwrap();
        assert_eq!(store.get_item("k1").unwrap(), None);

        // Removing again is fine
        store.remove_item("k1").unwrap();
    }

    #[test]
    fn test_keys_sorted() {
        let store = MemoryStore::new();
        store.set_item("b", "2").unwrap();
        store.set_item("a", "1").unwrap();
        store.set_item("c", "3").unwrap();

        assert_eq!(store.keys().unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_quota_rejects_and_keeps_old_value() {
        let store = MemoryStore::with_quota(10);
        store.set_item("key", "small").unwrap(); // 8 bytes

        let err = store.set_item("key", "much too large").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { limit: 10, .. }));
        assert_eq!(store.get_item("key").unwrap(), Some("small".to_string()));
    }

    #[test]
    fn test_quota_counts_replaced_value_once() {
        let store = MemoryStore::with_quota(10);
        store.set_item("key", "1234567").unwrap(); // exactly 10
        store.set_item("key", "7654321").unwrap(); // replacing keeps it at 10
        assert_eq!(store.usage(), 10);
    }

    #[test]
    fn test_disabled_store_fails_everything() {
        let store = MemoryStore::new();
        store.set_item("k", "v").unwrap();
        store.set_disabled(true);

        assert_eq!(store.get_item("k"), Err(StorageError::Unavailable));
        assert_eq!(store.set_item("k", "w"), Err(StorageError::Unavailable));
        assert_eq!(store.remove_item("k"), Err(StorageError::Unavailable));
        assert_eq!(store.keys(), Err(StorageError::Unavailable));

        store.set_disabled(false);
        assert_eq!(store.get_item("k").unwrap(), Some("v".to_string()));
    }
}
