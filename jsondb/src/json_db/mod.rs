// FICHIER : jsondb/src/json_db/mod.rs

pub mod collections;
pub mod query;
pub mod storage;
pub mod transactions;
