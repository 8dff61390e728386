//! Look-around service - street-level scene lookup for a coordinate

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::domain::geo::Coordinate;
use crate::domain::search::{LookAroundScene, SceneBackend};
use crate::domain::DomainError;

/// Fetches scenes and remembers the one currently shown
///
/// A failed lookup leaves the previously shown scene in place.
#[derive(Debug)]
pub struct LookAroundService {
    backend: Arc<dyn SceneBackend>,
    current: Mutex<Option<LookAroundScene>>,
}

impl LookAroundService {
    pub fn new(backend: Arc<dyn SceneBackend>) -> Self {
        Self {
            backend,
            current: Mutex::new(None),
        }
    }

    fn lock_current(&self) -> MutexGuard<'_, Option<LookAroundScene>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn current_scene(&self) -> Option<LookAroundScene> {
        self.lock_current().clone()
    }

    pub fn dismiss(&self) {
        self.lock_current().take();
    }

    /// Looks up the scene at `coordinate` and makes it the current one
    pub async fn scene_for(&self, coordinate: Coordinate) -> Result<LookAroundScene, DomainError> {
        coordinate.validate()?;

        let scene = self.backend.scene(coordinate).await.map_err(|e| {
            warn!(coordinate = %coordinate, error = %e, "Look-around scene lookup failed");
            match e {
                DomainError::SceneUnavailable { .. } => e,
                other => DomainError::scene_unavailable(other.to_string()),
            }
        })?;

        debug!(coordinate = %coordinate, scene = %scene.identifier, "Showing look-around scene");
        *self.lock_current() = Some(scene.clone());
        Ok(scene)
    }
}
