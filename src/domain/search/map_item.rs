//! Resolved places and result-type filters

use serde::{Deserialize, Serialize};

use crate::domain::geo::Coordinate;

/// Kind of result a backend may return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultType {
    Address,
    PointOfInterest,
    Query,
}

impl std::fmt::Display for ResultType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResultType::Address => "address",
            ResultType::PointOfInterest => "point_of_interest",
            ResultType::Query => "query",
        };
        f.write_str(name)
    }
}

/// A concrete place with a resolved coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapItem {
    pub name: String,
    pub coordinate: Coordinate,
    #[serde(default = "default_result_type")]
    pub result_type: ResultType,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub locality: Option<String>,
}

fn default_result_type() -> ResultType {
    ResultType::PointOfInterest
}

impl MapItem {
    pub fn new(name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            name: name.into(),
            coordinate,
            result_type: ResultType::PointOfInterest,
            category: None,
            locality: None,
        }
    }

    pub fn with_result_type(mut self, result_type: ResultType) -> Self {
        self.result_type = result_type;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_locality(mut self, locality: impl Into<String>) -> Self {
        self.locality = Some(locality.into());
        self
    }

    /// Subtitle shown under the name, e.g. in completions and annotations
    pub fn subtitle(&self) -> String {
        match (&self.category, &self.locality) {
            (Some(category), Some(locality)) => format!("{} · {}", category, locality),
            (Some(only), None) | (None, Some(only)) => only.clone(),
            (None, None) => String::new(),
        }
    }
}
