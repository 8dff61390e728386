//! moka-backed result cache

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;

use crate::domain::cache::Cache;
use crate::domain::DomainError;

/// Bounds for the in-memory cache
#[derive(Debug, Clone)]
pub struct InMemoryCacheConfig {
    /// Entry count past which moka starts evicting
    pub max_capacity: u64,
    /// Optional idle eviction; `None` keeps entries until capacity pressure
    pub time_to_idle: Option<Duration>,
}

impl Default for InMemoryCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 500,
            time_to_idle: None,
        }
    }
}

impl InMemoryCacheConfig {
    pub fn with_max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    pub fn with_time_to_idle(mut self, time_to_idle: Duration) -> Self {
        self.time_to_idle = Some(time_to_idle);
        self
    }
}

/// Process-local cache; contents are lost on exit
#[derive(Debug)]
pub struct InMemoryCache {
    entries: MokaCache<String, String>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::with_config(InMemoryCacheConfig::default())
    }

    pub fn with_config(config: InMemoryCacheConfig) -> Self {
        let builder = MokaCache::builder().max_capacity(config.max_capacity);

        let entries = match config.time_to_idle {
            Some(idle) => builder.time_to_idle(idle).build(),
            None => builder.build(),
        };

        Self { entries }
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn fetch(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.entries.get(key).await)
    }

    async fn insert(&self, key: &str, value: String) -> Result<(), DomainError> {
        self.entries.insert(key.to_string(), value).await;
        Ok(())
    }
}
