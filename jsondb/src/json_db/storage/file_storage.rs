// FICHIER : jsondb/src/json_db/storage/file_storage.rs

//! Format persistant d'une collection : un seul fichier JSON
//! `{ "nextIndex": <u64>, "documents": [ ... ] }`, toujours réécrit en entier.

use crate::json_db::collections::CollectionRecord;
use crate::utils::prelude::*;
use crate::utils::{fs, json};
use std::path::Path;

pub async fn collection_exists(path: &Path) -> bool {
    fs::exists(path).await
}

/// Lit et parse le fichier complet d'une collection.
#[instrument(skip(path), fields(path = ?path))]
pub async fn read_collection(path: &Path) -> Result<CollectionRecord> {
    let content = fs::read_to_string(path).await?;
    json::parse(&content)
}

/// Remplace intégralement le contenu du fichier (écriture atomique).
pub async fn write_collection(path: &Path, record: &CollectionRecord) -> Result<()> {
    fs::write_json_atomic(path, record).await
}

/// Crée le fichier d'une collection vide. L'appelant a vérifié l'absence du fichier.
pub async fn create_empty_collection(path: &Path) -> Result<()> {
    write_collection(path, &CollectionRecord::default()).await
}

pub async fn delete_collection(path: &Path) -> Result<()> {
    fs::remove_file(path).await
}
