//! Infrastructure layer - storage, cache, backends and services

pub mod cache;
pub mod catalog;
pub mod logging;
pub mod services;
pub mod storage;
