//! Storage domain - string-keyed persistence used for small app state

mod repository;

pub use repository::{KeyValueStore, KeyValueStoreExt};

#[cfg(test)]
pub use repository::mock::MockKeyValueStore;
