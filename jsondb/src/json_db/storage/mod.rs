// FICHIER : jsondb/src/json_db/storage/mod.rs

pub mod file_storage;

use crate::json_db::transactions::lock_manager::LockManager;
use crate::utils::prelude::*;
use crate::utils::{env, fs};
use std::path::PathBuf;

/// Variable d'environnement désignant la racine de la base.
pub const ENV_DATA_ROOT: &str = "JSONDB_ROOT";

/// Extension des fichiers de collection.
pub const COLLECTION_EXT: &str = "json";

// --- CONFIGURATION ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonDbConfig {
    pub data_root: PathBuf,
}

impl JsonDbConfig {
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(env::get(ENV_DATA_ROOT)?))
    }

    /// Fichier d'une collection : {data_root}/{collection}.json
    pub fn collection_path(&self, collection: &str) -> Result<PathBuf> {
        if !fs::is_plain_file_name(collection) {
            return Err(JsonDbError::InvalidCollectionName(collection.to_string()));
        }
        Ok(self
            .data_root
            .join(format!("{collection}.{COLLECTION_EXT}")))
    }
}

// --- MOTEUR DE STOCKAGE ---

/// Point d'entrée injectable : racine de la base + verrous par collection.
/// Aucun cache de contenu : le fichier reste l'unique source de vérité.
#[derive(Debug, Clone)]
pub struct StorageEngine {
    pub config: JsonDbConfig,
    pub locks: LockManager,
}

impl StorageEngine {
    /// Ouvre la base ; crée le dossier racine s'il est absent, le réutilise tel quel sinon.
    #[instrument(skip(config), fields(root = ?config.data_root))]
    pub async fn open(config: JsonDbConfig) -> Result<Self> {
        if !fs::exists(&config.data_root).await {
            info!("Création du dossier racine de la base");
        }
        fs::ensure_dir(&config.data_root).await?;
        Ok(Self::new(config))
    }

    /// Construit le moteur sans toucher au disque.
    pub fn new(config: JsonDbConfig) -> Self {
        Self {
            config,
            locks: LockManager::new(),
        }
    }
}
