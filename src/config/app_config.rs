use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::recent::{DuplicatePolicy, DEFAULT_MAX_RECENT_SEARCHES};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub recents: RecentsConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecentsConfig {
    /// Storage backend: "file" or "memory"
    #[serde(default = "default_recents_backend")]
    pub backend: String,
    #[serde(default = "default_recents_path")]
    pub storage_path: PathBuf,
    #[serde(default = "default_recents_key")]
    pub storage_key: String,
    #[serde(default = "default_max_count")]
    pub max_count: usize,
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_region_update_interval_ms")]
    pub region_update_interval_ms: u64,
    #[serde(default = "default_completion_debounce_ms")]
    pub completion_debounce_ms: u64,
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: u64,
    #[serde(default = "default_max_completions")]
    pub max_completions: usize,
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_recents_backend() -> String {
    "file".to_string()
}

fn default_recents_path() -> PathBuf {
    PathBuf::from("data/state.json")
}

fn default_recents_key() -> String {
    "RecentSearches".to_string()
}

fn default_max_count() -> usize {
    DEFAULT_MAX_RECENT_SEARCHES
}

fn default_region_update_interval_ms() -> u64 {
    3_000
}

fn default_completion_debounce_ms() -> u64 {
    200
}

fn default_cache_capacity() -> u64 {
    500
}

fn default_max_completions() -> usize {
    10
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/places.json")
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl Default for RecentsConfig {
    fn default() -> Self {
        Self {
            backend: default_recents_backend(),
            storage_path: default_recents_path(),
            storage_key: default_recents_key(),
            max_count: default_max_count(),
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            region_update_interval_ms: default_region_update_interval_ms(),
            completion_debounce_ms: default_completion_debounce_ms(),
            cache_capacity: default_cache_capacity(),
            max_completions: default_max_completions(),
            catalog_path: default_catalog_path(),
        }
    }
}

impl SearchConfig {
    pub fn region_update_interval(&self) -> Duration {
        Duration::from_millis(self.region_update_interval_ms)
    }

    pub fn completion_debounce(&self) -> Duration {
        Duration::from_millis(self.completion_debounce_ms)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.recents.max_count, 10);
        assert_eq!(config.recents.storage_key, "RecentSearches");
        assert_eq!(config.recents.duplicate_policy, DuplicatePolicy::PromoteToFront);
        assert_eq!(config.search.region_update_interval(), Duration::from_secs(3));
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{"recents":{"max_count":3,"duplicate_policy":"keep_existing"},"logging":{"format":"json"}}"#,
        )
        .unwrap();

        assert_eq!(config.recents.max_count, 3);
        assert_eq!(config.recents.duplicate_policy, DuplicatePolicy::KeepExisting);
        assert_eq!(config.recents.backend, "file");
        assert!(matches!(config.logging.format, LogFormat::Json));
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.search.completion_debounce(), Duration::from_millis(200));
    }
}
