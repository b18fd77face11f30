// FICHIER : jsondb/src/json_db/query/mod.rs

//! Modèle de requêtes : valeurs immuables, constructeurs fluides, aiguillage.

pub mod builder;
pub mod executor;
pub mod filter;

pub use builder::{
    create_collection, delete_all_from, delete_from, insert_into, select_from, update,
    DeleteQueryBuilder, SelectQueryBuilder, UpdateQueryBuilder, UpdateValuesBuilder,
};
pub use filter::{Filter, Lookup, INDEX_KEY};

use crate::json_db::collections::Document;
use crate::utils::json::{self, Value};
use crate::utils::{JsonDbError, Result};
use serde::{Deserialize, Serialize};

// --- VALEURS DE REQUÊTE ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCollectionQuery {
    name: String,
}

impl CreateCollectionQuery {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertQuery {
    collection: String,
    document: Document,
}

impl InsertQuery {
    pub fn new(collection: impl Into<String>, document: Document) -> Self {
        Self {
            collection: collection.into(),
            document,
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_parts(self) -> (String, Document) {
        (self.collection, self.document)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectQuery {
    collection: String,
    #[serde(default)]
    filter: Filter,
}

impl SelectQuery {
    pub fn new(collection: impl Into<String>, filter: impl Into<Filter>) -> Self {
        Self {
            collection: collection.into(),
            filter: filter.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateQuery {
    collection: String,
    #[serde(default)]
    values: Document,
    #[serde(default)]
    filter: Filter,
}

impl UpdateQuery {
    pub fn new(collection: impl Into<String>, values: Document, filter: impl Into<Filter>) -> Self {
        Self {
            collection: collection.into(),
            values,
            filter: filter.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn values(&self) -> &Document {
        &self.values
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteQuery {
    collection: String,
    #[serde(default)]
    filter: Filter,
}

impl DeleteQuery {
    pub fn new(collection: impl Into<String>, filter: impl Into<Filter>) -> Self {
        Self {
            collection: collection.into(),
            filter: filter.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }
}

/// Somme fermée des requêtes supportées.
/// Forme JSON : objet étiqueté `{"type": "select", "collection": ..., "filter": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Query {
    CreateCollection(CreateCollectionQuery),
    Insert(InsertQuery),
    Select(SelectQuery),
    Update(UpdateQuery),
    Delete(DeleteQuery),
}

/// Étiquettes acceptées dans la forme JSON.
pub const QUERY_TYPES: [&str; 5] = ["create_collection", "insert", "select", "update", "delete"];

impl Query {
    /// Collection visée (le nom pour une création).
    pub fn collection(&self) -> &str {
        match self {
            Self::CreateCollection(q) => q.name(),
            Self::Insert(q) => q.collection(),
            Self::Select(q) => q.collection(),
            Self::Update(q) => q.collection(),
            Self::Delete(q) => q.collection(),
        }
    }
}

// --- RÉSOLUTION VERS UNE REQUÊTE ---

/// Tout ce qui peut être soumis au moteur : requête finie, constructeur, descripteur JSON.
pub trait IntoQuery {
    fn into_query(self) -> Result<Query>;
}

impl IntoQuery for Query {
    fn into_query(self) -> Result<Query> {
        Ok(self)
    }
}

macro_rules! impl_query_variant {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Query {
                fn from(q: $ty) -> Self {
                    Query::$variant(q)
                }
            }

            impl IntoQuery for $ty {
                fn into_query(self) -> Result<Query> {
                    Ok(Query::$variant(self))
                }
            }
        )*
    };
}

impl_query_variant! {
    CreateCollectionQuery => CreateCollection,
    InsertQuery => Insert,
    SelectQuery => Select,
    UpdateQuery => Update,
    DeleteQuery => Delete,
}

impl IntoQuery for Value {
    fn into_query(self) -> Result<Query> {
        let tag = match &self {
            Value::Object(map) => match map.get("type") {
                Some(Value::String(tag)) => tag.clone(),
                Some(other) => {
                    return Err(JsonDbError::UnknownQueryType(format!(
                        "object with a {} type tag",
                        json::type_name(other)
                    )))
                }
                None => {
                    return Err(JsonDbError::UnknownQueryType(
                        "object without type tag".to_string(),
                    ))
                }
            },
            other => {
                return Err(JsonDbError::UnknownQueryType(
                    json::type_name(other).to_string(),
                ))
            }
        };

        if !QUERY_TYPES.contains(&tag.as_str()) {
            return Err(JsonDbError::UnknownQueryType(format!(
                "object tagged \"{tag}\""
            )));
        }

        serde_json::from_value(self).map_err(|e| JsonDbError::InvalidQuery(e.to_string()))
    }
}
