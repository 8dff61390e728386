//! Recent searches service - persisted MRU list of query strings

use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

use tracing::{debug, warn};

use crate::domain::recent::{DuplicatePolicy, RecentSearchList, DEFAULT_MAX_RECENT_SEARCHES};
use crate::domain::storage::{KeyValueStore, KeyValueStoreExt};

/// Configuration for the recent searches service
#[derive(Debug, Clone)]
pub struct RecentSearchesConfig {
    /// Key the list is persisted under
    pub storage_key: String,
    /// Maximum number of entries kept
    pub max_count: usize,
    /// Behavior of `add` for text already in the list
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for RecentSearchesConfig {
    fn default() -> Self {
        Self {
            storage_key: "RecentSearches".to_string(),
            max_count: DEFAULT_MAX_RECENT_SEARCHES,
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

impl RecentSearchesConfig {
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_max_count(mut self, max_count: usize) -> Self {
        self.max_count = max_count;
        self
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }
}

/// Bounded, de-duplicated recent search list persisted after every mutation
///
/// Persistence is best-effort: a failed write is logged and the in-memory
/// list stays authoritative for the rest of the process lifetime.
#[derive(Debug)]
pub struct RecentSearchesService {
    store: Arc<dyn KeyValueStore>,
    config: RecentSearchesConfig,
    list: RwLock<RecentSearchList>,
}

impl RecentSearchesService {
    /// Creates the service with default configuration, loading any persisted list
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_config(store, RecentSearchesConfig::default())
    }

    /// Creates the service with custom config, loading any persisted list
    pub fn with_config(store: Arc<dyn KeyValueStore>, config: RecentSearchesConfig) -> Self {
        let stored: Vec<String> = match store.get(&config.storage_key) {
            Ok(Some(entries)) => entries,
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(key = %config.storage_key, error = %e, "Ignoring unreadable recent searches");
                Vec::new()
            }
        };

        let list = RecentSearchList::from_entries(stored, config.max_count)
            .with_policy(config.duplicate_policy);

        debug!(count = list.len(), max = list.max_count(), "Loaded recent searches");

        Self {
            store,
            config,
            list: RwLock::new(list),
        }
    }

    /// Snapshot of the list, most recent first
    pub fn recent_searches(&self) -> Vec<String> {
        self.list
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries()
            .to_vec()
    }

    pub fn max_count(&self) -> usize {
        self.list
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .max_count()
    }

    /// Inserts `text` at the front, evicting the least recent entry when full
    pub fn add(&self, text: impl Into<String>) {
        let mut list = self.write_list();
        list.add(text);
        self.persist(&list);
    }

    /// Removes the entry at `index`; out-of-bounds is a no-op
    pub fn delete(&self, index: usize) {
        let mut list = self.write_list();

        match list.delete(index) {
            Some(removed) => {
                debug!(index, removed = %removed, "Deleted recent search");
                self.persist(&list);
            }
            None => debug!(index, len = list.len(), "Ignoring out-of-bounds recent search delete"),
        }
    }

    pub fn clear(&self) {
        let mut list = self.write_list();
        list.clear();
        self.persist(&list);
    }

    /// Promotes a previously saved search to the front; absent text is a no-op
    pub fn update_recent(&self, text: &str) {
        let mut list = self.write_list();

        if list.update_recent(text) {
            self.persist(&list);
        }
    }

    /// Changes the bound, dropping the least recent entries that no longer fit
    pub fn set_max_count(&self, max_count: usize) {
        let mut list = self.write_list();
        let before = list.len();
        list.resize(max_count);

        if list.len() != before {
            self.persist(&list);
        }
    }

    fn write_list(&self) -> RwLockWriteGuard<'_, RecentSearchList> {
        self.list.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, list: &RecentSearchList) {
        if let Err(e) = self.store.set(&self.config.storage_key, list.entries()) {
            warn!(key = %self.config.storage_key, error = %e, "Failed to persist recent searches");
        }
    }
}
