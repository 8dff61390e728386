//! Search requests and look-around scenes

use serde::{Deserialize, Serialize};

use super::ResultType;
use crate::domain::geo::{Coordinate, SearchRegion};

/// A resolution request sent to the search backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub natural_language_query: String,
    pub region: SearchRegion,
    pub result_types: Vec<ResultType>,
}

impl SearchRequest {
    pub fn new(natural_language_query: impl Into<String>) -> Self {
        Self {
            natural_language_query: natural_language_query.into(),
            region: SearchRegion::world(),
            result_types: vec![ResultType::PointOfInterest],
        }
    }

    pub fn with_region(mut self, region: SearchRegion) -> Self {
        self.region = region;
        self
    }

    pub fn with_result_types(mut self, result_types: Vec<ResultType>) -> Self {
        self.result_types = result_types;
        self
    }

    /// Whether the given kind of result passes this request's filter
    pub fn accepts(&self, result_type: ResultType) -> bool {
        self.result_types.is_empty() || self.result_types.contains(&result_type)
    }
}

/// A street-level scene located at a coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookAroundScene {
    pub identifier: String,
    pub coordinate: Coordinate,
}

impl LookAroundScene {
    pub fn new(identifier: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            identifier: identifier.into(),
            coordinate,
        }
    }
}
