//! Collections JSON : enregistrement persistant et opérations du magasin

pub mod manager;

use crate::utils::json::{Map, Value};
use serde::{Deserialize, Serialize};

/// Document : objet JSON imbriqué (ordre des champs préservé).
pub type Document = Map<String, Value>;

/// Champ réservé posé à l'insertion, immuable ensuite.
pub const INDEX_FIELD: &str = "_index";

/// Contenu complet du fichier d'une collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionRecord {
    /// Prochain `_index` à attribuer ; jamais décrémenté ni réutilisé.
    pub next_index: u64,
    pub documents: Vec<Document>,
}

impl CollectionRecord {
    /// Ajoute un document et lui attribue son `_index`.
    pub fn push(&mut self, mut document: Document) -> u64 {
        let index = self.next_index;
        document.insert(INDEX_FIELD.to_string(), Value::from(index));
        self.next_index += 1;
        self.documents.push(document);
        index
    }
}
