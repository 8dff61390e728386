//! Search region

use serde::{Deserialize, Serialize};

use super::{Coordinate, CoordinateSpan};
use crate::domain::DomainError;

/// Geographic area used to scope completion and resolution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchRegion {
    pub center: Coordinate,
    pub span: CoordinateSpan,
}

impl SearchRegion {
    pub fn new(center: Coordinate, span: CoordinateSpan) -> Result<Self, DomainError> {
        center.validate()?;
        Ok(Self { center, span })
    }

    /// The whole-world region every service starts with
    pub fn world() -> Self {
        Self {
            center: Coordinate {
                latitude: 0.0,
                longitude: 0.0,
            },
            span: CoordinateSpan {
                latitude_delta: 180.0,
                longitude_delta: 360.0,
            },
        }
    }

    pub fn is_world(&self) -> bool {
        self.span.latitude_delta >= 180.0 && self.span.longitude_delta >= 360.0
    }

    /// Whether the coordinate lies inside the region (edges inclusive)
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        if self.is_world() {
            return true;
        }

        let (d_lat, d_lon) = self.center.degree_offset(coordinate);
        d_lat <= self.span.latitude_delta / 2.0 && d_lon <= self.span.longitude_delta / 2.0
    }
}

impl Default for SearchRegion {
    fn default() -> Self {
        Self::world()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(lat: f64, lon: f64, d_lat: f64, d_lon: f64) -> SearchRegion {
        SearchRegion::new(
            Coordinate::new(lat, lon).unwrap(),
            CoordinateSpan::new(d_lat, d_lon).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_world_contains_everything() {
        let world = SearchRegion::world();

        assert!(world.is_world());
        assert!(world.contains(&Coordinate::new(89.9, -179.9).unwrap()));
        assert!(world.contains(&Coordinate::new(-89.9, 179.9).unwrap()));
    }

    #[test]
    fn test_contains_is_edge_inclusive() {
        let istanbul = region(41.0, 29.0, 1.0, 1.0);

        assert!(istanbul.contains(&Coordinate::new(41.5, 29.5).unwrap()));
        assert!(istanbul.contains(&Coordinate::new(41.0, 29.0).unwrap()));
        assert!(!istanbul.contains(&Coordinate::new(41.6, 29.0).unwrap()));
    }

    #[test]
    fn test_contains_across_antimeridian() {
        let pacific = region(0.0, 179.5, 2.0, 2.0);

        assert!(pacific.contains(&Coordinate::new(0.0, -179.8).unwrap()));
        assert!(!pacific.contains(&Coordinate::new(0.0, -178.0).unwrap()));
    }
}
