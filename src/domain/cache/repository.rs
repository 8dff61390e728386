//! Result cache seam

use std::fmt::Debug;
use std::future::Future;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::domain::DomainError;

/// Best-effort string cache keyed by query
///
/// Entries carry no expiry and are never removed by callers; they vanish only
/// under memory pressure, so a miss just means "ask the backend". Values are
/// JSON text to keep the trait object-safe; [`CacheExt`] adds typed access.
#[async_trait]
pub trait Cache: Send + Sync + Debug {
    async fn fetch(&self, key: &str) -> Result<Option<String>, DomainError>;

    async fn insert(&self, key: &str, value: String) -> Result<(), DomainError>;
}

/// Typed JSON access on top of [`Cache`]
pub trait CacheExt: Cache {
    fn fetch_json<'a, V>(
        &'a self,
        key: &'a str,
    ) -> impl Future<Output = Result<Option<V>, DomainError>> + Send + 'a
    where
        V: DeserializeOwned + Send + 'a,
    {
        async move {
            let Some(text) = self.fetch(key).await? else {
                return Ok(None);
            };

            serde_json::from_str(&text)
                .map(Some)
                .map_err(|e| DomainError::cache(format!("Corrupt entry '{}': {}", key, e)))
        }
    }

    fn insert_json<'a, V>(
        &'a self,
        key: &'a str,
        value: &'a V,
    ) -> impl Future<Output = Result<(), DomainError>> + Send + 'a
    where
        V: Serialize + Sync + ?Sized,
    {
        async move {
            let text = serde_json::to_string(value)
                .map_err(|e| DomainError::cache(format!("Unencodable entry '{}': {}", key, e)))?;
            self.insert(key, text).await
        }
    }
}

impl<C: Cache + ?Sized> CacheExt for C {}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Cache double that records hits and misses and can be switched to fail
    #[derive(Debug, Default)]
    pub struct MockCache {
        entries: Mutex<HashMap<String, String>>,
        failure: Option<String>,
        hits: AtomicUsize,
        misses: AtomicUsize,
    }

    impl MockCache {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_entry<V: Serialize + ?Sized>(self, key: &str, value: &V) -> Self {
            let text = serde_json::to_string(value).unwrap();
            self.entries.lock().unwrap().insert(key.to_string(), text);
            self
        }

        /// Every operation fails with `message`
        pub fn failing(mut self, message: impl Into<String>) -> Self {
            self.failure = Some(message.into());
            self
        }

        /// Drops an entry the way memory pressure would
        pub fn evict(&self, key: &str) {
            self.entries.lock().unwrap().remove(key);
        }

        pub fn hit_count(&self) -> usize {
            self.hits.load(Ordering::SeqCst)
        }

        pub fn miss_count(&self) -> usize {
            self.misses.load(Ordering::SeqCst)
        }

        fn fail(&self) -> Result<(), DomainError> {
            match &self.failure {
                Some(message) => Err(DomainError::cache(message.clone())),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl Cache for MockCache {
        async fn fetch(&self, key: &str) -> Result<Option<String>, DomainError> {
            self.fail()?;
            let found = self.entries.lock().unwrap().get(key).cloned();
            let counter = if found.is_some() { &self.hits } else { &self.misses };
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(found)
        }

        async fn insert(&self, key: &str, value: String) -> Result<(), DomainError> {
            self.fail()?;
            self.entries.lock().unwrap().insert(key.to_string(), value);
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_typed_entries_and_counters() {
            let cache = MockCache::new();
            cache.insert_json("q", &["park", "pier"]).await.unwrap();

            let found: Option<Vec<String>> = cache.fetch_json("q").await.unwrap();
            let missing: Option<Vec<String>> = cache.fetch_json("other").await.unwrap();

            assert_eq!(found, Some(vec!["park".to_string(), "pier".to_string()]));
            assert!(missing.is_none());
            assert_eq!((cache.hit_count(), cache.miss_count()), (1, 1));
        }

        #[tokio::test]
        async fn test_evicted_entry_is_a_miss() {
            let cache = MockCache::new().with_entry("q", &[1, 2, 3]);
            cache.evict("q");

            assert!(cache.fetch("q").await.unwrap().is_none());
            assert_eq!(cache.miss_count(), 1);
        }

        #[tokio::test]
        async fn test_corrupt_entry_is_a_cache_error() {
            let cache = MockCache::new();
            cache.insert("q", "{broken".to_string()).await.unwrap();

            let result: Result<Option<Vec<String>>, _> = cache.fetch_json("q").await;
            assert!(matches!(result, Err(DomainError::Cache { .. })));
        }

        #[tokio::test]
        async fn test_failing_cache() {
            let cache = MockCache::new().failing("offline");

            assert!(cache.fetch("q").await.is_err());
            assert!(cache.insert("q", "1".to_string()).await.is_err());
        }
    }
}
