//! Key-value store trait definition

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

use crate::domain::DomainError;

/// Synchronous string-keyed store
///
/// Values are JSON strings so the trait stays dyn-compatible.
/// Use [`KeyValueStoreExt`] for typed access.
pub trait KeyValueStore: Send + Sync + Debug {
    /// Reads the raw JSON value stored under `key`
    fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Writes a raw JSON value under `key`, replacing any previous value
    fn set_raw(&self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Removes `key`, returns true if it existed
    fn remove(&self, key: &str) -> Result<bool, DomainError>;
}

/// Extension trait providing typed get/set operations
pub trait KeyValueStoreExt: KeyValueStore {
    fn get<V>(&self, key: &str) -> Result<Option<V>, DomainError>
    where
        V: DeserializeOwned,
    {
        match self.get_raw(key)? {
            Some(data) => {
                let value = serde_json::from_str(&data).map_err(|e| {
                    DomainError::storage(format!("Failed to deserialize '{}': {}", key, e))
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn set<V>(&self, key: &str, value: &V) -> Result<(), DomainError>
    where
        V: Serialize + ?Sized,
    {
        let data = serde_json::to_string(value)
            .map_err(|e| DomainError::storage(format!("Failed to serialize '{}': {}", key, e)))?;
        self.set_raw(key, &data)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStoreExt for T {}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Mock store that counts writes and can be told to fail them
    #[derive(Debug, Default)]
    pub struct MockKeyValueStore {
        entries: Mutex<HashMap<String, String>>,
        write_error: Mutex<Option<String>>,
        writes: AtomicUsize,
    }

    impl MockKeyValueStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_entry<V: Serialize + ?Sized>(self, key: &str, value: &V) -> Self {
            let json = serde_json::to_string(value).unwrap();
            self.entries.lock().unwrap().insert(key.to_string(), json);
            self
        }

        pub fn with_raw_entry(self, key: &str, raw: &str) -> Self {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), raw.to_string());
            self
        }

        pub fn fail_writes(&self, error: impl Into<String>) {
            *self.write_error.lock().unwrap() = Some(error.into());
        }

        pub fn write_count(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }
    }

    impl KeyValueStore for MockKeyValueStore {
        fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError> {
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        fn set_raw(&self, key: &str, value: &str) -> Result<(), DomainError> {
            self.writes.fetch_add(1, Ordering::SeqCst);

            if let Some(error) = self.write_error.lock().unwrap().clone() {
                return Err(DomainError::storage(error));
            }

            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<bool, DomainError> {
            Ok(self.entries.lock().unwrap().remove(key).is_some())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_mock_store_typed_round_trip() {
            let store = MockKeyValueStore::new();
            store.set("list", &vec!["a".to_string()]).unwrap();

            let value: Option<Vec<String>> = store.get("list").unwrap();
            assert_eq!(value, Some(vec!["a".to_string()]));
            assert_eq!(store.write_count(), 1);
        }

        #[test]
        fn test_mock_store_malformed_value() {
            let store = MockKeyValueStore::new().with_raw_entry("list", "not json");

            let result: Result<Option<Vec<String>>, _> = store.get("list");
            assert!(matches!(result, Err(DomainError::Storage { .. })));
        }

        #[test]
        fn test_mock_store_failed_write() {
            let store = MockKeyValueStore::new();
            store.fail_writes("read-only");

            assert!(store.set("list", &Vec::<String>::new()).is_err());
            assert_eq!(store.write_count(), 1);
        }
    }
}
