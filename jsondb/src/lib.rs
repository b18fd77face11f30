// FICHIER : jsondb/src/lib.rs

pub mod json_db;
pub mod utils;

pub use json_db::collections::manager::CollectionsManager;
pub use json_db::query::executor::{QueryEngine, QueryOutcome};
pub use json_db::storage::{JsonDbConfig, StorageEngine};
pub use utils::error::{JsonDbError, Result};
