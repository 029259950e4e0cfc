//! In-process storage.

use super::{Storage, StorageError, StorageErrorKind};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, instrument};

/// Records kept in a map behind a mutex. Clones of the handle are not shared;
/// wrap it in an `Arc` to share one store between sessions.
#[derive(Debug)]
pub struct MemoryStorage<K, T> {
    records: Mutex<HashMap<K, T>>,
}

impl<K, T> MemoryStorage<K, T> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<K, T>>, StorageError> {
        self.records
            .lock()
            .map_err(|_| StorageError::new(StorageErrorKind::Backend, "Storage lock poisoned"))
    }
}

impl<K, T> Default for MemoryStorage<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, T> Storage<K, T> for MemoryStorage<K, T>
where
    K: Clone + Eq + Hash + std::fmt::Debug + std::fmt::Display + Send,
    T: Clone + std::fmt::Debug + Send,
{
    #[instrument(skip(self, value))]
    fn create(&self, key: &K, value: &T) -> Result<(), StorageError> {
        let mut records = self.lock()?;
        if records.contains_key(key) {
            return Err(StorageError::already_exists(key));
        }
        records.insert(key.clone(), value.clone());
        debug!(%key, "Record created");
        Ok(())
    }

    #[instrument(skip(self))]
    fn read(&self, key: &K) -> Result<Option<T>, StorageError> {
        Ok(self.lock()?.get(key).cloned())
    }

    #[instrument(skip(self, value))]
    fn update(&self, key: &K, value: &T) -> Result<(), StorageError> {
        let mut records = self.lock()?;
        match records.get_mut(key) {
            Some(slot) => {
                *slot = value.clone();
                debug!(%key, "Record updated");
                Ok(())
            }
            None => Err(StorageError::not_found(key)),
        }
    }

    #[instrument(skip(self))]
    fn delete(&self, key: &K) -> Result<(), StorageError> {
        match self.lock()?.remove(key) {
            Some(_) => {
                debug!(%key, "Record deleted");
                Ok(())
            }
            None => Err(StorageError::not_found(key)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryStorage<String, u32> {
        MemoryStorage::new()
    }

    #[test]
    fn test_create_then_read() {
        let s = store();
        s.create(&"a".to_string(), &1).expect("create");
        assert_eq!(s.read(&"a".to_string()).expect("read"), Some(1));
        assert_eq!(s.read(&"b".to_string()).expect("read"), None);
    }

    #[test]
    fn test_create_twice_fails() {
        let s = store();
        s.create(&"a".to_string(), &1).expect("create");
        let err = s.create(&"a".to_string(), &2).expect_err("duplicate");
        assert_eq!(err.kind, StorageErrorKind::AlreadyExists);
        assert_eq!(s.read(&"a".to_string()).expect("read"), Some(1));
    }

    #[test]
    fn test_update_and_delete_require_record() {
        let s = store();
        let key = "a".to_string();
        assert_eq!(s.update(&key, &1).expect_err("missing").kind, StorageErrorKind::NotFound);
        assert_eq!(s.delete(&key).expect_err("missing").kind, StorageErrorKind::NotFound);

        s.create(&key, &1).expect("create");
        s.update(&key, &5).expect("update");
        assert_eq!(s.read(&key).expect("read"), Some(5));
        s.delete(&key).expect("delete");
        assert_eq!(s.read(&key).expect("read"), None);
    }
}
