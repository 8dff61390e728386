//! Searchable map
//!
//! Place search core for a map view:
//! - Recent searches kept as a bounded, de-duplicated most-recent-first list
//! - Debounced query completion with stale responses discarded
//! - Resolution of completions into places, cached per query
//! - Rate-limited "search this area" region updates and map annotations

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use config::RecentsConfig;
use domain::storage::KeyValueStore;
use infrastructure::{
    cache::{InMemoryCache, InMemoryCacheConfig},
    catalog::{CatalogBackend, CatalogConfig},
    services::{
        AnnotationService, LocalSearchConfig, LocalSearchService, LookAroundService,
        RecentSearchesConfig, RecentSearchesService,
    },
    storage::{StorageConfig, StorageFactory, StorageType},
};

/// Services shared by every command
#[derive(Debug)]
pub struct AppServices {
    pub recents: RecentSearchesService,
    pub annotations: AnnotationService,
    pub look_around: LookAroundService,
}

impl AppServices {
    pub fn search(&self) -> &LocalSearchService {
        self.annotations.search()
    }
}

/// Create the application services from configuration
pub fn create_app_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    let store = create_store(&config.recents)?;

    let recents = RecentSearchesService::with_config(
        store,
        RecentSearchesConfig::default()
            .with_storage_key(config.recents.storage_key.clone())
            .with_max_count(config.recents.max_count)
            .with_duplicate_policy(config.recents.duplicate_policy),
    );

    let catalog = Arc::new(
        CatalogBackend::from_json_file(
            &config.search.catalog_path,
            CatalogConfig {
                max_completions: config.search.max_completions,
                ..CatalogConfig::default()
            },
        )
        .context("Failed to load place catalog")?,
    );

    let cache = Arc::new(InMemoryCache::with_config(
        InMemoryCacheConfig::default().with_max_capacity(config.search.cache_capacity),
    ));

    let search = LocalSearchService::with_config(
        catalog.clone(),
        catalog.clone(),
        cache,
        LocalSearchConfig::default()
            .with_region_update_interval(config.search.region_update_interval())
            .with_completion_debounce(config.search.completion_debounce()),
    );

    info!(
        places = catalog.places().len(),
        max_recents = recents.max_count(),
        "Application services initialized"
    );

    Ok(AppServices {
        recents,
        annotations: AnnotationService::new(search),
        look_around: LookAroundService::new(catalog),
    })
}

fn create_store(config: &RecentsConfig) -> anyhow::Result<Arc<dyn KeyValueStore>> {
    let storage_type = StorageType::from_str(&config.backend)
        .with_context(|| format!("Unknown recents backend: {}", config.backend))?;

    let storage_config = match storage_type {
        StorageType::InMemory => StorageConfig::in_memory(),
        StorageType::File => StorageConfig::file(&config.storage_path),
    };

    Ok(StorageFactory::create(&storage_config)?)
}
