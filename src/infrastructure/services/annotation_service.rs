//! Annotation service - turns completions into map pins

use std::sync::{Mutex, MutexGuard, PoisonError};

use futures::future::join_all;
use tracing::{debug, info, warn};

use super::{CompletionStatus, LocalSearchService};
use crate::domain::annotation::{Annotation, AnnotationSet};
use crate::domain::geo::SearchRegion;
use crate::domain::search::SearchCompletion;
use crate::domain::DomainError;

/// Resolves completions through [`LocalSearchService`] and keeps the pins
/// currently on the map, unique by coordinate
#[derive(Debug)]
pub struct AnnotationService {
    search: LocalSearchService,
    annotations: Mutex<AnnotationSet>,
}

impl AnnotationService {
    pub fn new(search: LocalSearchService) -> Self {
        Self {
            search,
            annotations: Mutex::new(AnnotationSet::new()),
        }
    }

    pub fn search(&self) -> &LocalSearchService {
        &self.search
    }

    fn lock_annotations(&self) -> MutexGuard<'_, AnnotationSet> {
        self.annotations.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn annotations(&self) -> Vec<Annotation> {
        self.lock_annotations().iter().cloned().collect()
    }

    pub fn clear(&self) {
        self.lock_annotations().clear();
    }

    async fn annotation_for(&self, completion: &SearchCompletion) -> Result<Annotation, DomainError> {
        let items = self.search.resolve(completion).await?;
        Annotation::from_resolution(completion, &items)
    }

    /// Resolves one completion and pins its first place.
    ///
    /// If a pin already sits at that coordinate, the existing pin is returned.
    pub async fn annotate(&self, completion: &SearchCompletion) -> Result<Annotation, DomainError> {
        let annotation = self.annotation_for(completion).await?;
        let (annotation, added) = self.lock_annotations().insert(annotation);

        debug!(title = %annotation.title, coordinate = %annotation.coordinate, added, "Annotated completion");
        Ok(annotation)
    }

    /// Resolves all completions concurrently and pins every success.
    ///
    /// Candidates that resolve to nothing or whose resolution fails are
    /// skipped so one bad suggestion never blocks the rest.
    pub async fn annotate_all(&self, completions: &[SearchCompletion]) -> Vec<Annotation> {
        let results = join_all(completions.iter().map(|c| self.annotation_for(c))).await;

        let mut pinned = Vec::with_capacity(results.len());
        let mut annotations = self.lock_annotations();

        for (completion, result) in completions.iter().zip(results) {
            match result {
                Ok(annotation) => {
                    let (annotation, _) = annotations.insert(annotation);
                    if !pinned.contains(&annotation) {
                        pinned.push(annotation);
                    }
                }
                Err(e) if e.is_soft_failure() => {
                    debug!(title = %completion.title, "Skipping completion without places");
                }
                Err(e) => {
                    warn!(title = %completion.title, error = %e, "Skipping completion that failed to resolve");
                }
            }
        }

        info!(requested = completions.len(), pinned = pinned.len(), "Annotated completions");
        pinned
    }

    /// "Search this area": moves the search region, waits for the current
    /// fragment to be completed again inside it and pins those suggestions.
    ///
    /// Returns `None` when the region update is rejected by the rate limiter;
    /// the existing pins are left untouched in that case. If the completion
    /// for the new region fails, the map is left without pins.
    pub async fn search_this_area(&self, region: SearchRegion) -> Option<Vec<Annotation>> {
        if !self.search.set_search_region(region) {
            return None;
        }

        let status = self.search.wait_until_settled().await;
        self.clear();

        let suggestions = match status {
            CompletionStatus::Ready => self.search.suggestions(),
            CompletionStatus::Failed => {
                warn!("Completion for the new search area failed, nothing to pin");
                Vec::new()
            }
            CompletionStatus::Idle | CompletionStatus::Pending => Vec::new(),
        };

        Some(self.annotate_all(&suggestions).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::domain::geo::{Coordinate, CoordinateSpan};
    use crate::domain::search::{MapItem, MockCompletionBackend, MockSearchBackend};
    use crate::infrastructure::cache::InMemoryCache;
    use crate::infrastructure::catalog::CatalogBackend;
    use crate::infrastructure::services::LocalSearchConfig;

    fn coordinate(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    fn service_with(searcher: MockSearchBackend, completer: MockCompletionBackend) -> AnnotationService {
        let search = LocalSearchService::with_config(
            Arc::new(completer),
            Arc::new(searcher),
            Arc::new(InMemoryCache::new()),
            LocalSearchConfig::default()
                .with_completion_debounce(Duration::ZERO)
                .with_region_update_interval(Duration::from_secs(60)),
        );
        AnnotationService::new(search)
    }

    fn searcher() -> MockSearchBackend {
        MockSearchBackend::new()
            .with_response(
                "Galata Tower Istanbul",
                vec![MapItem::new("Galata Tower", coordinate(41.0256, 28.9741))],
            )
            .with_response(
                "Galata Kulesi",
                vec![MapItem::new("Galata Kulesi", coordinate(41.0256, 28.9741))],
            )
            .with_response(
                "Moda Park",
                vec![MapItem::new("Moda Park", coordinate(40.9810, 29.0260))],
            )
    }

    #[tokio::test]
    async fn test_annotate_reuses_pin_at_same_coordinate() {
        let service = service_with(searcher(), MockCompletionBackend::new());

        let first = service
            .annotate(&SearchCompletion::new("Galata Tower", "Istanbul"))
            .await
            .unwrap();
        let second = service
            .annotate(&SearchCompletion::new("Galata Kulesi", ""))
            .await
            .unwrap();

        assert_eq!(first.title, "Galata Tower");
        assert_eq!(second, first);
        assert_eq!(service.annotations().len(), 1);
    }

    #[tokio::test]
    async fn test_annotate_without_places_is_no_result() {
        let service = service_with(searcher(), MockCompletionBackend::new());

        let result = service.annotate(&SearchCompletion::new("Atlantis", "")).await;

        assert!(matches!(result, Err(DomainError::NoResultFound { .. })));
        assert!(service.annotations().is_empty());
    }

    #[tokio::test]
    async fn test_annotate_all_skips_failures() {
        let service = service_with(searcher(), MockCompletionBackend::new());
        let completions = vec![
            SearchCompletion::new("Galata Tower", "Istanbul"),
            SearchCompletion::new("Atlantis", ""),
            SearchCompletion::new("Moda Park", ""),
            SearchCompletion::new("Galata Kulesi", ""),
        ];

        let pinned = service.annotate_all(&completions).await;

        let titles: Vec<_> = pinned.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, ["Galata Tower", "Moda Park"]);
        assert_eq!(service.annotations().len(), 2);
    }

    #[tokio::test]
    async fn test_annotate_all_survives_backend_outage() {
        let service = service_with(
            MockSearchBackend::new().with_error("offline"),
            MockCompletionBackend::new(),
        );

        let pinned = service
            .annotate_all(&[SearchCompletion::new("Moda Park", "")])
            .await;

        assert!(pinned.is_empty());
    }

    fn two_city_service() -> AnnotationService {
        let catalog = Arc::new(
            CatalogBackend::new(vec![
                MapItem::new("Moda Park", coordinate(40.981024, 29.026035))
                    .with_category("Park")
                    .with_locality("Kadıköy"),
                MapItem::new("Gençlik Park", coordinate(39.936, 32.848))
                    .with_category("Park")
                    .with_locality("Ankara"),
            ])
            .unwrap(),
        );

        let search = LocalSearchService::with_config(
            catalog.clone(),
            catalog,
            Arc::new(InMemoryCache::new()),
            LocalSearchConfig::default()
                .with_completion_debounce(Duration::ZERO)
                .with_region_update_interval(Duration::from_secs(60)),
        );
        AnnotationService::new(search)
    }

    fn around(lat: f64, lon: f64) -> SearchRegion {
        SearchRegion::new(coordinate(lat, lon), CoordinateSpan::new(0.5, 0.5).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_search_this_area_pins_completions_from_new_region() {
        let service = two_city_service();

        service.search().complete_query("park");
        assert_eq!(service.search().wait_until_settled().await, CompletionStatus::Ready);
        assert_eq!(service.search().suggestions().len(), 2);

        let pinned = service.annotate_all(&service.search().suggestions()).await;
        assert_eq!(pinned.len(), 2);

        let pinned = service.search_this_area(around(39.93, 32.85)).await.unwrap();

        let titles: Vec<_> = pinned.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, ["Gençlik Park"]);
        assert_eq!(service.annotations(), pinned);

        let suggestions: Vec<_> = service
            .search()
            .suggestions()
            .into_iter()
            .map(|c| c.title)
            .collect();
        assert_eq!(suggestions, ["Gençlik Park"]);
    }

    #[tokio::test]
    async fn test_search_this_area_inside_rate_limit_is_rejected() {
        let service = two_city_service();
        service.search().complete_query("park");

        let pinned = service.search_this_area(around(40.98, 29.03)).await.unwrap();
        assert_eq!(pinned.len(), 1);
        assert_eq!(pinned[0].title, "Moda Park");

        assert!(service.search_this_area(around(39.93, 32.85)).await.is_none());
        assert_eq!(service.annotations(), pinned);
    }

    #[tokio::test]
    async fn test_search_this_area_with_failed_completion_clears_pins() {
        let service = service_with(searcher(), MockCompletionBackend::new().with_error("offline"));
        service
            .annotate(&SearchCompletion::new("Galata Tower", "Istanbul"))
            .await
            .unwrap();
        service.search().complete_query("moda");

        let pinned = service.search_this_area(SearchRegion::world()).await.unwrap();

        assert!(pinned.is_empty());
        assert!(service.annotations().is_empty());
    }
}
