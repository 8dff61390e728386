//! Coordinate and span value types

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// A WGS84 coordinate in degrees
///
/// Equality is exact: two annotations are the same place only if both
/// components compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate, rejecting values outside the valid ranges
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        let coordinate = Self {
            latitude,
            longitude,
        };
        coordinate.validate()?;
        Ok(coordinate)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(DomainError::validation(format!(
                "Latitude {} is outside [-90, 90]",
                self.latitude
            )));
        }

        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(DomainError::validation(format!(
                "Longitude {} is outside [-180, 180]",
                self.longitude
            )));
        }

        Ok(())
    }

    /// Component-wise distance in degrees, with longitude wrapped across the antimeridian
    pub fn degree_offset(&self, other: &Coordinate) -> (f64, f64) {
        let d_lat = (self.latitude - other.latitude).abs();
        let mut d_lon = (self.longitude - other.longitude).abs();
        if d_lon > 180.0 {
            d_lon = 360.0 - d_lon;
        }
        (d_lat, d_lon)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6},{:.6}", self.latitude, self.longitude)
    }
}

/// Extent of a region in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSpan {
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl CoordinateSpan {
    pub fn new(latitude_delta: f64, longitude_delta: f64) -> Result<Self, DomainError> {
        if !latitude_delta.is_finite() || !(0.0..=180.0).contains(&latitude_delta) {
            return Err(DomainError::validation(format!(
                "Latitude delta {} is outside [0, 180]",
                latitude_delta
            )));
        }

        if !longitude_delta.is_finite() || !(0.0..=360.0).contains(&longitude_delta) {
            return Err(DomainError::validation(format!(
                "Longitude delta {} is outside [0, 360]",
                longitude_delta
            )));
        }

        Ok(Self {
            latitude_delta,
            longitude_delta,
        })
    }
}
