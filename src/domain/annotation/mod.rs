//! Annotation domain - pins placed for resolved completions

mod entity;

pub use entity::{Annotation, AnnotationSet};
