// FICHIER : jsondb/src/json_db/query/executor.rs

use crate::json_db::collections::manager::CollectionsManager;
use crate::json_db::collections::Document;
use crate::json_db::query::{IntoQuery, Query};
use crate::utils::prelude::*;

/// Résultat d'une requête, selon sa variante.
/// Les entiers valent -1 quand l'opération a échoué (forme callback).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "result", rename_all = "snake_case")]
pub enum QueryOutcome {
    Created(bool),
    Inserted(i64),
    Selected(Vec<Document>),
    Updated(i64),
    Deleted(i64),
    /// La valeur soumise n'a pas pu être résolue en requête.
    Nothing,
}

impl QueryOutcome {
    /// Valeur sentinelle accompagnant une erreur pour la requête donnée.
    pub fn sentinel(query: &Query) -> Self {
        match query {
            Query::CreateCollection(_) => Self::Created(false),
            Query::Insert(_) => Self::Inserted(-1),
            Query::Select(_) => Self::Selected(Vec::new()),
            Query::Update(_) => Self::Updated(-1),
            Query::Delete(_) => Self::Deleted(-1),
        }
    }

    /// `_index` attribué par une insertion réussie.
    pub fn inserted_index(&self) -> Option<u64> {
        match self {
            Self::Inserted(i) => u64::try_from(*i).ok(),
            _ => None,
        }
    }

    /// Nombre de documents modifiés ou supprimés.
    pub fn affected(&self) -> Option<usize> {
        match self {
            Self::Updated(n) | Self::Deleted(n) => usize::try_from(*n).ok(),
            _ => None,
        }
    }

    pub fn documents(&self) -> Option<&[Document]> {
        match self {
            Self::Selected(docs) => Some(docs),
            _ => None,
        }
    }
}

// --- MOTEUR DE REQUÊTE ---

/// Point d'entrée unique : résout la valeur soumise puis l'aiguille vers le magasin.
pub struct QueryEngine<'a> {
    manager: &'a CollectionsManager<'a>,
}

impl<'a> QueryEngine<'a> {
    pub fn new(manager: &'a CollectionsManager<'a>) -> Self {
        Self { manager }
    }

    /// Soumet une requête, un constructeur (finalisé au passage) ou un descripteur JSON.
    pub async fn submit(&self, query: impl IntoQuery) -> Result<QueryOutcome> {
        let query = query.into_query().inspect_err(|e| {
            warn!(error = %e, "Requête rejetée avant exécution");
        })?;
        self.execute_query(query).await
    }

    /// Variante à rappel : `(erreur, résultat)`, avec la sentinelle de la variante en cas d'échec.
    pub async fn submit_with<F>(&self, query: impl IntoQuery, callback: F)
    where
        F: FnOnce(Option<JsonDbError>, QueryOutcome),
    {
        let query = match query.into_query() {
            Ok(q) => q,
            Err(e) => return callback(Some(e), QueryOutcome::Nothing),
        };
        let sentinel = QueryOutcome::sentinel(&query);
        match self.execute_query(query).await {
            Ok(outcome) => callback(None, outcome),
            Err(e) => callback(Some(e), sentinel),
        }
    }

    /// Table d'aiguillage : une variante, une opération du magasin.
    pub async fn execute_query(&self, query: Query) -> Result<QueryOutcome> {
        debug!(collection = query.collection(), "Exécution de la requête");
        match query {
            Query::CreateCollection(q) => {
                let created = self.manager.create_collection(&q).await?;
                Ok(QueryOutcome::Created(created))
            }
            Query::Insert(q) => {
                let index = self.manager.insert(q).await?;
                Ok(QueryOutcome::Inserted(saturating_i64(index)))
            }
            Query::Select(q) => {
                let documents = self.manager.select(&q).await?;
                Ok(QueryOutcome::Selected(documents))
            }
            Query::Update(q) => {
                let modified = self.manager.update(&q).await?;
                Ok(QueryOutcome::Updated(saturating_i64(modified)))
            }
            Query::Delete(q) => {
                let removed = self.manager.delete(&q).await?;
                Ok(QueryOutcome::Deleted(saturating_i64(removed)))
            }
        }
    }
}

/// Conversion sans troncature : un résultat ne peut jamais devenir négatif (sentinelle -1).
fn saturating_i64<T: TryInto<i64>>(value: T) -> i64 {
    value.try_into().unwrap_or(i64::MAX)
}
