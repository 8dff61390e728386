//! In-process catalog backend over a fixed list of places

mod backend;
mod matcher;

pub use backend::{CatalogBackend, CatalogConfig};
pub use matcher::{match_ranges, tokens_contained};
