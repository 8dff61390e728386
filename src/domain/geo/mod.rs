//! Geographic primitives - coordinates, spans and search regions

mod coordinate;
mod region;

pub use coordinate::{Coordinate, CoordinateSpan};
pub use region::SearchRegion;
