// FICHIER : jsondb/src/json_db/query/builder.rs

//! Constructeurs fluides. Le terme `where_` consomme le constructeur et rend la
//! requête finie ; un constructeur soumis tel quel est finalisé avec un filtre vide.

use super::{
    CreateCollectionQuery, DeleteQuery, Filter, InsertQuery, IntoQuery, Query, SelectQuery,
    UpdateQuery,
};
use crate::json_db::collections::Document;
use crate::utils::Result;

pub fn create_collection(name: impl Into<String>) -> CreateCollectionQuery {
    CreateCollectionQuery::new(name)
}

pub fn insert_into(collection: impl Into<String>, document: Document) -> InsertQuery {
    InsertQuery::new(collection, document)
}

pub fn select_from(collection: impl Into<String>) -> SelectQueryBuilder {
    SelectQueryBuilder {
        collection: collection.into(),
    }
}

pub fn update(collection: impl Into<String>) -> UpdateQueryBuilder {
    UpdateQueryBuilder {
        collection: collection.into(),
    }
}

pub fn delete_from(collection: impl Into<String>) -> DeleteQueryBuilder {
    DeleteQueryBuilder {
        collection: collection.into(),
    }
}

/// Suppression sans filtre : vide la collection (le compteur `nextIndex` est conservé).
pub fn delete_all_from(collection: impl Into<String>) -> DeleteQuery {
    DeleteQuery::new(collection, Filter::all())
}

// --- SELECT ---

#[derive(Debug, Clone)]
#[must_use]
pub struct SelectQueryBuilder {
    collection: String,
}

impl SelectQueryBuilder {
    pub fn where_(self, filter: impl Into<Filter>) -> SelectQuery {
        SelectQuery::new(self.collection, filter)
    }

    pub fn build(self) -> SelectQuery {
        self.where_(Filter::all())
    }
}

// --- UPDATE ---

/// Première étape : seule `to` est disponible.
#[derive(Debug, Clone)]
#[must_use]
pub struct UpdateQueryBuilder {
    collection: String,
}

impl UpdateQueryBuilder {
    pub fn to(self, values: Document) -> UpdateValuesBuilder {
        UpdateValuesBuilder {
            collection: self.collection,
            values,
        }
    }

    /// Finalisation sans valeurs ni filtre.
    pub fn build(self) -> UpdateQuery {
        UpdateQuery::new(self.collection, Document::new(), Filter::all())
    }
}

/// Seconde étape : valeurs fixées, en attente du filtre.
#[derive(Debug, Clone)]
#[must_use]
pub struct UpdateValuesBuilder {
    collection: String,
    values: Document,
}

impl UpdateValuesBuilder {
    pub fn where_(self, filter: impl Into<Filter>) -> UpdateQuery {
        UpdateQuery::new(self.collection, self.values, filter)
    }

    pub fn build(self) -> UpdateQuery {
        self.where_(Filter::all())
    }
}

// --- DELETE ---

#[derive(Debug, Clone)]
#[must_use]
pub struct DeleteQueryBuilder {
    collection: String,
}

impl DeleteQueryBuilder {
    pub fn where_(self, filter: impl Into<Filter>) -> DeleteQuery {
        DeleteQuery::new(self.collection, filter)
    }

    pub fn build(self) -> DeleteQuery {
        self.where_(Filter::all())
    }
}

macro_rules! impl_builder_finalize {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoQuery for $ty {
                fn into_query(self) -> Result<Query> {
                    Ok(self.build().into())
                }
            }
        )*
    };
}

impl_builder_finalize!(
    SelectQueryBuilder,
    UpdateQueryBuilder,
    UpdateValuesBuilder,
    DeleteQueryBuilder,
);
