// FICHIER : jsondb/src/json_db/query/filter.rs

//! Filtre ET-seulement, éventuellement imbriqué : champ → valeur attendue.

use crate::json_db::collections::Document;
use crate::utils::json::{self, Value};
use serde::{Deserialize, Serialize};

/// Clé réservée (niveau racine uniquement) : accès direct par position.
pub const INDEX_KEY: &str = "index";

/// Vrai si chaque clé du filtre est présente dans le document avec une valeur satisfaisante.
/// Objet attendu contre objet présent : récursion ; sinon égalité stricte.
/// Les champs du document absents du filtre sont ignorés.
pub fn filter_document(document: &Document, filter: &Document) -> bool {
    matches_entries(document, filter.iter())
}

fn matches_entries<'f>(
    document: &Document,
    mut entries: impl Iterator<Item = (&'f String, &'f Value)>,
) -> bool {
    // `all` s'arrête à la première clé en échec
    entries.all(|(key, expected)| match document.get(key) {
        Some(actual) => value_matches(actual, expected),
        None => false,
    })
}

fn value_matches(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Object(actual), Value::Object(expected)) => filter_document(actual, expected),
        _ => json::values_equal(actual, expected),
    }
}

/// Stratégie de localisation des candidats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// Parcours complet de la collection.
    Scan,
    /// Position directe ; `None` si la valeur de `index` n'est pas une position valide.
    Direct(Option<usize>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filter(Document);

impl Filter {
    pub fn new(conditions: Document) -> Self {
        Self(conditions)
    }

    /// Filtre vide : accepte tous les documents.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn conditions(&self) -> &Document {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn lookup(&self) -> Lookup {
        match self.0.get(INDEX_KEY) {
            None => Lookup::Scan,
            Some(value) => Lookup::Direct(position_of(value)),
        }
    }

    /// Évalue le filtre hors clé réservée `index`.
    pub fn matches(&self, document: &Document) -> bool {
        matches_entries(document, self.0.iter().filter(|(key, _)| *key != INDEX_KEY))
    }

    /// Positions (croissantes) des documents retenus.
    /// Le raccourci par index valide quand même le candidat contre les autres clés.
    pub fn positions(&self, documents: &[Document]) -> Vec<usize> {
        match self.lookup() {
            Lookup::Direct(position) => position
                .filter(|&i| documents.get(i).is_some_and(|doc| self.matches(doc)))
                .into_iter()
                .collect(),
            Lookup::Scan => documents
                .iter()
                .enumerate()
                .filter(|(_, doc)| self.matches(doc))
                .map(|(i, _)| i)
                .collect(),
        }
    }
}

/// Position désignée par `index` : entier positif, ou flottant entier (`1.0`).
fn position_of(value: &Value) -> Option<usize> {
    match value {
        Value::Number(n) => json::exact_integer(n).and_then(|i| usize::try_from(i).ok()),
        _ => None,
    }
}

impl From<Document> for Filter {
    fn from(conditions: Document) -> Self {
        Self(conditions)
    }
}
