//! Domain layer - Core entities, policies and backend seams

pub mod annotation;
pub mod cache;
pub mod error;
pub mod geo;
pub mod recent;
pub mod search;
pub mod storage;

pub use annotation::{Annotation, AnnotationSet};
pub use cache::{Cache, CacheExt};
pub use error::DomainError;
pub use geo::{Coordinate, CoordinateSpan, SearchRegion};
pub use recent::{DuplicatePolicy, RecentSearchList, DEFAULT_MAX_RECENT_SEARCHES};
pub use search::{
    highlight_segments, CompletionBackend, LookAroundScene, MapItem, ResultType, SceneBackend,
    SearchBackend, SearchCompletion, SearchRequest, TextRange,
};
pub use storage::{KeyValueStore, KeyValueStoreExt};
