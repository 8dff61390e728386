use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, info};

use super::matcher::{match_ranges, tokens_contained};
use crate::domain::geo::{Coordinate, SearchRegion};
use crate::domain::search::{
    CompletionBackend, LookAroundScene, MapItem, ResultType, SceneBackend, SearchBackend,
    SearchCompletion, SearchRequest,
};
use crate::domain::DomainError;

const BACKEND_NAME: &str = "catalog";

/// Tuning for the catalog backend
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Maximum number of completions returned per fragment
    pub max_completions: usize,
    /// Largest per-axis offset, in degrees, at which a place still has a scene
    pub scene_tolerance: f64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            max_completions: 10,
            scene_tolerance: 0.0005,
        }
    }
}

/// Completion, search and scene backend answering from a fixed list of places
#[derive(Debug)]
pub struct CatalogBackend {
    places: Vec<MapItem>,
    config: CatalogConfig,
}

impl CatalogBackend {
    pub fn new(places: Vec<MapItem>) -> Result<Self, DomainError> {
        Self::with_config(places, CatalogConfig::default())
    }

    pub fn with_config(places: Vec<MapItem>, config: CatalogConfig) -> Result<Self, DomainError> {
        for place in &places {
            place.coordinate.validate().map_err(|e| {
                DomainError::configuration(format!("Place '{}' is invalid: {}", place.name, e))
            })?;
        }

        Ok(Self { places, config })
    }

    /// Loads places from a JSON array of map items
    pub fn from_json_file(path: impl AsRef<Path>, config: CatalogConfig) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|e| {
            DomainError::configuration(format!("Failed to read catalog {}: {}", path.display(), e))
        })?;
        let places: Vec<MapItem> = serde_json::from_str(&data).map_err(|e| {
            DomainError::configuration(format!("Failed to parse catalog {}: {}", path.display(), e))
        })?;

        info!(path = %path.display(), places = places.len(), "Loaded place catalog");
        Self::with_config(places, config)
    }

    pub fn places(&self) -> &[MapItem] {
        &self.places
    }

    fn candidates<'a>(
        &'a self,
        region: &'a SearchRegion,
        result_types: &'a [ResultType],
    ) -> impl Iterator<Item = &'a MapItem> + 'a {
        self.places.iter().filter(move |place| {
            region.contains(&place.coordinate)
                && (result_types.is_empty() || result_types.contains(&place.result_type))
        })
    }
}

#[async_trait]
impl CompletionBackend for CatalogBackend {
    async fn complete(
        &self,
        fragment: &str,
        region: &SearchRegion,
        result_types: &[ResultType],
    ) -> Result<Vec<SearchCompletion>, DomainError> {
        let mut ranked: Vec<(usize, SearchCompletion)> = self
            .candidates(region, result_types)
            .filter_map(|place| {
                let subtitle = place.subtitle();
                let title_highlights = match_ranges(&place.name, fragment);
                let subtitle_highlights = match_ranges(&subtitle, fragment);

                // Title hits rank ahead of subtitle-only hits
                let rank = match (title_highlights.first(), subtitle_highlights.first()) {
                    (Some(hit), _) => hit.location,
                    (None, Some(hit)) => usize::MAX / 2 + hit.location,
                    (None, None) => return None,
                };

                let completion = SearchCompletion::new(place.name.clone(), subtitle)
                    .with_title_highlights(title_highlights)
                    .with_subtitle_highlights(subtitle_highlights);
                Some((rank, completion))
            })
            .collect();

        ranked.sort_by(|(a_rank, a), (b_rank, b)| {
            a_rank.cmp(b_rank).then_with(|| a.title.cmp(&b.title))
        });
        ranked.truncate(self.config.max_completions);

        debug!(fragment = %fragment, count = ranked.len(), "Catalog completions");
        Ok(ranked.into_iter().map(|(_, completion)| completion).collect())
    }

    fn backend_name(&self) -> &'static str {
        BACKEND_NAME
    }
}

#[async_trait]
impl SearchBackend for CatalogBackend {
    async fn search(&self, request: SearchRequest) -> Result<Vec<MapItem>, DomainError> {
        let query = request.natural_language_query.as_str();

        let mut items: Vec<&MapItem> = self
            .candidates(&request.region, &request.result_types)
            .filter(|place| tokens_contained(&format!("{} {}", place.name, place.subtitle()), query))
            .collect();

        // Places whose whole name appears in the query come first
        items.sort_by_key(|place| {
            let named = tokens_contained(query, &place.name);
            (!named, place.name.clone())
        });

        debug!(query = %query, count = items.len(), "Catalog search");
        Ok(items.into_iter().cloned().collect())
    }

    fn backend_name(&self) -> &'static str {
        BACKEND_NAME
    }
}

#[async_trait]
impl SceneBackend for CatalogBackend {
    async fn scene(&self, coordinate: Coordinate) -> Result<LookAroundScene, DomainError> {
        let tolerance = self.config.scene_tolerance;

        self.places
            .iter()
            .find(|place| {
                let (d_lat, d_lon) = place.coordinate.degree_offset(&coordinate);
                d_lat <= tolerance && d_lon <= tolerance
            })
            .map(|place| LookAroundScene::new(scene_identifier(&place.name), place.coordinate))
            .ok_or_else(|| {
                DomainError::scene_unavailable(format!("No look-around imagery near {}", coordinate))
            })
    }
}

fn scene_identifier(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
