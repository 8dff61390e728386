//! Recent searches domain

mod list;

pub use list::{DuplicatePolicy, RecentSearchList, DEFAULT_MAX_RECENT_SEARCHES};
