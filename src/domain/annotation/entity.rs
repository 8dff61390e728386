//! Map annotations

use serde::{Deserialize, Serialize};

use crate::domain::geo::Coordinate;
use crate::domain::search::{MapItem, SearchCompletion};
use crate::domain::DomainError;

/// A pin placed on the map for a resolved completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub title: String,
    pub subtitle: String,
    pub coordinate: Coordinate,
}

impl Annotation {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            coordinate,
        }
    }

    /// Builds an annotation from the first place a resolution produced
    pub fn from_resolution(
        completion: &SearchCompletion,
        items: &[MapItem],
    ) -> Result<Self, DomainError> {
        let item = items.first().ok_or_else(|| {
            DomainError::no_result_found(format!(
                "'{}' resolved to no places",
                completion.title
            ))
        })?;

        Ok(Self::new(
            item.name.clone(),
            item.subtitle(),
            item.coordinate,
        ))
    }
}

/// Annotations currently on the map, unique by coordinate
#[derive(Debug, Clone, Default)]
pub struct AnnotationSet {
    annotations: Vec<Annotation>,
}

impl AnnotationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the annotation unless one already sits at the same coordinate.
    ///
    /// Returns the annotation that is on the map afterwards and whether it was newly added.
    pub fn insert(&mut self, annotation: Annotation) -> (Annotation, bool) {
        if let Some(existing) = self.find(&annotation.coordinate) {
            return (existing.clone(), false);
        }

        self.annotations.push(annotation.clone());
        (annotation, true)
    }

    pub fn find(&self, coordinate: &Coordinate) -> Option<&Annotation> {
        self.annotations
            .iter()
            .find(|annotation| annotation.coordinate == *coordinate)
    }

    pub fn clear(&mut self) {
        self.annotations.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter()
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinate(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn test_from_resolution_uses_first_item() {
        let completion = SearchCompletion::new("Moda", "Kadıköy");
        let items = vec![
            MapItem::new("Moda Park", coordinate(40.98, 29.02)).with_category("Park"),
            MapItem::new("Moda Pier", coordinate(40.99, 29.03)),
        ];

        let annotation = Annotation::from_resolution(&completion, &items).unwrap();
        assert_eq!(annotation.title, "Moda Park");
        assert_eq!(annotation.subtitle, "Park");
        assert_eq!(annotation.coordinate, coordinate(40.98, 29.02));
    }

    #[test]
    fn test_from_resolution_without_items_is_no_result() {
        let completion = SearchCompletion::new("Nowhere", "");
        let result = Annotation::from_resolution(&completion, &[]);

        assert!(matches!(result, Err(DomainError::NoResultFound { .. })));
    }

    #[test]
    fn test_insert_deduplicates_by_coordinate() {
        let mut set = AnnotationSet::new();
        let first = Annotation::new("Galata Tower", "", coordinate(41.0256, 28.9741));
        let same_place = Annotation::new("Galata Kulesi", "", coordinate(41.0256, 28.9741));

        let (added, is_new) = set.insert(first.clone());
        assert!(is_new);
        assert_eq!(added, first);

        let (existing, is_new) = set.insert(same_place);
        assert!(!is_new);
        assert_eq!(existing.title, "Galata Tower");
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut set = AnnotationSet::new();
        set.insert(Annotation::new("A", "", coordinate(1.0, 1.0)));
        set.insert(Annotation::new("B", "", coordinate(2.0, 2.0)));
        assert_eq!(set.iter().count(), 2);

        set.clear();
        assert!(set.is_empty());
    }
}
