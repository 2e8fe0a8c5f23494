//! Ingestion pipeline - read, cleanse, map, reconcile, write

pub mod cleanse;
pub mod dedup;
pub mod fetch;
pub mod import;
pub mod map;
pub mod read;
pub mod types;
pub mod utils;
pub mod write;

pub use types::*;
pub use write::ImportError;
