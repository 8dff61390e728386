//! Infrastructure services

mod annotation_service;
mod local_search_service;
mod look_around_service;
mod recent_searches_service;

pub use annotation_service::AnnotationService;
pub use local_search_service::{CompletionStatus, LocalSearchConfig, LocalSearchService};
pub use look_around_service::LookAroundService;
pub use recent_searches_service::{RecentSearchesConfig, RecentSearchesService};
