//! Storage infrastructure - KeyValueStore implementations

mod factory;
mod file;
mod in_memory;

pub use factory::{StorageConfig, StorageFactory, StorageType};
pub use file::JsonFileStore;
pub use in_memory::InMemoryKeyValueStore;
