// FICHIER : jsondb/src/utils/error.rs

use serde::Serialize;
use std::io;

/// Type de résultat standard de la base.
pub type Result<T> = std::result::Result<T, JsonDbError>;

/// Enumération centrale des erreurs de la base documentaire.
/// Toutes les erreurs remontent par la même voie que les succès : aucune panique dans le cœur.
#[derive(Debug, thiserror::Error)]
pub enum JsonDbError {
    #[error("Collection introuvable : {0}")]
    CollectionNotFound(String),

    #[error("La collection existe déjà : {0}")]
    CollectionAlreadyExists(String),

    #[error("Type de requête inconnu : {0}")]
    UnknownQueryType(String),

    #[error("Requête invalide : {0}")]
    InvalidQuery(String),

    #[error("Nom de collection invalide : '{0}'")]
    InvalidCollectionName(String),

    #[error("Erreur d'entrée/sortie : {0}")]
    Io(#[from] io::Error),

    #[error("Contenu JSON invalide : {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Erreur de configuration : {0}")]
    Config(String),
}

impl JsonDbError {
    /// Code machine stable (sortie CLI, logs structurés).
    pub fn code(&self) -> &'static str {
        match self {
            Self::CollectionNotFound(_) => "ERR_COLLECTION_NOT_FOUND",
            Self::CollectionAlreadyExists(_) => "ERR_COLLECTION_ALREADY_EXISTS",
            Self::UnknownQueryType(_) => "ERR_UNKNOWN_QUERY_TYPE",
            Self::InvalidQuery(_) => "ERR_INVALID_QUERY",
            Self::InvalidCollectionName(_) => "ERR_INVALID_COLLECTION_NAME",
            Self::Io(_) => "ERR_IO",
            Self::Parse(_) => "ERR_PARSE",
            Self::Config(_) => "ERR_CONFIG",
        }
    }
}

// L'erreur est sérialisée en simple chaîne (sortie JSON du CLI).
impl Serialize for JsonDbError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}
