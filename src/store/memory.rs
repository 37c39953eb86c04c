//! In-memory store

use std::sync::Mutex;

use rustc_hash::FxHashMap;

use super::{Store, StoreError};

/// Volatile store backed by a hash map.
///
/// The drop-in fake for tests and demos; state lives only as long as the
/// value itself.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<FxHashMap<String, String>>,
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        entries.insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        entries.remove(key);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_returns_value() -> testresult::TestResult {
        let store = MemoryStore::default();

        store.set("k", "v")?;

        assert_eq!(store.get("k")?, Some("v".to_string()));

        Ok(())
    }

    #[test]
    fn set_replaces_existing_value() -> testresult::TestResult {
        let store = MemoryStore::default();

        store.set("k", "old")?;
        store.set("k", "new")?;

        assert_eq!(store.get("k")?, Some("new".to_string()));

        Ok(())
    }

    #[test]
    fn remove_is_a_no_op_for_absent_keys() -> testresult::TestResult {
        let store = MemoryStore::default();

        store.remove("absent")?;

        assert_eq!(store.get("absent")?, None);

        Ok(())
    }
}
