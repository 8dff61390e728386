//! Backend traits for completion, resolution and scene lookup

use std::fmt::Debug;

use async_trait::async_trait;

use super::{LookAroundScene, MapItem, ResultType, SearchCompletion, SearchRequest};
use crate::domain::geo::{Coordinate, SearchRegion};
use crate::domain::DomainError;

/// Produces ranked completions for a partial query
#[async_trait]
pub trait CompletionBackend: Send + Sync + Debug {
    async fn complete(
        &self,
        fragment: &str,
        region: &SearchRegion,
        result_types: &[ResultType],
    ) -> Result<Vec<SearchCompletion>, DomainError>;

    /// Get the backend name
    fn backend_name(&self) -> &'static str;
}

/// Resolves a query to concrete places
#[async_trait]
pub trait SearchBackend: Send + Sync + Debug {
    async fn search(&self, request: SearchRequest) -> Result<Vec<MapItem>, DomainError>;

    /// Get the backend name
    fn backend_name(&self) -> &'static str;
}

/// Looks up a street-level scene for a coordinate
#[async_trait]
pub trait SceneBackend: Send + Sync + Debug {
    async fn scene(&self, coordinate: Coordinate) -> Result<LookAroundScene, DomainError>;
}
