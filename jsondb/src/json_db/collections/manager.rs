// FICHIER : jsondb/src/json_db/collections/manager.rs

use crate::json_db::collections::{CollectionRecord, Document, INDEX_FIELD};
use crate::json_db::query::{CreateCollectionQuery, DeleteQuery, InsertQuery, SelectQuery, UpdateQuery};
use crate::json_db::storage::{file_storage, StorageEngine, COLLECTION_EXT};
use crate::utils::fs::{self, Path};
use crate::utils::prelude::*;
use tokio::sync::OwnedMutexGuard;

/// Magasin de collections : une opération par variante de requête.
/// Chaque opération relit le fichier complet sous le verrou de la collection,
/// applique la mutation en mémoire puis réécrit le fichier entier.
#[derive(Debug)]
pub struct CollectionsManager<'a> {
    pub storage: &'a StorageEngine,
}

impl<'a> CollectionsManager<'a> {
    pub fn new(storage: &'a StorageEngine) -> Self {
        Self { storage }
    }

    // --- GESTION DES COLLECTIONS ---

    #[instrument(skip(self, query), fields(collection = %query.name()))]
    pub async fn create_collection(&self, query: &CreateCollectionQuery) -> Result<bool> {
        let name = query.name();
        let path = self.storage.config.collection_path(name)?;
        let _guard = self.lock(name).await;

        if file_storage::collection_exists(&path).await {
            warn!("Création refusée : la collection existe déjà");
            return Err(JsonDbError::CollectionAlreadyExists(name.to_string()));
        }

        file_storage::create_empty_collection(&path).await?;
        info!("Collection créée");
        Ok(true)
    }

    /// Supprime le fichier d'une collection. `false` si elle n'existait pas.
    /// Le verrou de la collection est ensuite oublié s'il n'est plus utilisé.
    #[instrument(skip(self))]
    pub async fn drop_collection(&self, collection: &str) -> Result<bool> {
        let path = self.storage.config.collection_path(collection)?;
        let dropped = {
            let _guard = self.lock(collection).await;
            if file_storage::collection_exists(&path).await {
                file_storage::delete_collection(&path).await.map(|()| true)
            } else {
                Ok(false)
            }
        };
        self.storage.locks.release(collection);

        if dropped? {
            info!("Collection supprimée");
            return Ok(true);
        }
        Ok(false)
    }

    /// Noms des collections présentes sous la racine, triés.
    pub async fn list_collections(&self) -> Result<Vec<String>> {
        let root = &self.storage.config.data_root;
        let mut out = Vec::new();
        if !fs::exists(root).await {
            return Ok(out);
        }

        let mut entries = fs::read_dir(root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let p = entry.path();
            if !entry.file_type().await?.is_file()
                || p.extension().and_then(|s| s.to_str()) != Some(COLLECTION_EXT)
            {
                continue;
            }
            if let Some(stem) = p.file_stem().and_then(|s| s.to_str()) {
                if fs::is_plain_file_name(stem) {
                    out.push(stem.to_string());
                }
            }
        }
        out.sort();
        Ok(out)
    }

    pub async fn count(&self, collection: &str) -> Result<usize> {
        let record = self.read(collection).await?;
        Ok(record.documents.len())
    }

    // --- OPÉRATIONS DE REQUÊTE ---

    /// Insère un document et renvoie son `_index`.
    /// La collection doit exister : aucune création implicite.
    #[instrument(skip(self, query), fields(collection = %query.collection()))]
    pub async fn insert(&self, query: InsertQuery) -> Result<u64> {
        let (collection, document) = query.into_parts();
        let index = self
            .mutate(&collection, move |record| record.push(document))
            .await?;
        debug!(index, "Document inséré");
        Ok(index)
    }

    /// Documents retenus par le filtre, dans l'ordre de stockage.
    #[instrument(skip(self, query), fields(collection = %query.collection()))]
    pub async fn select(&self, query: &SelectQuery) -> Result<Vec<Document>> {
        let record = self.read(query.collection()).await?;
        let positions = query.filter().positions(&record.documents);

        let mut documents = record.documents;
        let selected: Vec<Document> = positions
            .into_iter()
            .map(|i| std::mem::take(&mut documents[i]))
            .collect();
        debug!(count = selected.len(), "Sélection terminée");
        Ok(selected)
    }

    /// Applique les nouvelles valeurs (affectation de premier niveau) aux documents retenus.
    /// `_index` n'est jamais réécrit. Renvoie le nombre de documents modifiés.
    #[instrument(skip(self, query), fields(collection = %query.collection()))]
    pub async fn update(&self, query: &UpdateQuery) -> Result<usize> {
        let modified = self
            .mutate(query.collection(), |record| {
                let positions = query.filter().positions(&record.documents);
                for &i in &positions {
                    apply_values(&mut record.documents[i], query.values());
                }
                positions.len()
            })
            .await?;
        debug!(modified, "Mise à jour terminée");
        Ok(modified)
    }

    /// Retire les documents retenus. Renvoie le nombre de documents supprimés.
    #[instrument(skip(self, query), fields(collection = %query.collection()))]
    pub async fn delete(&self, query: &DeleteQuery) -> Result<usize> {
        let removed = self
            .mutate(query.collection(), |record| {
                let positions = query.filter().positions(&record.documents);
                let mut doomed = positions.iter().peekable();
                let mut position = 0;
                record.documents.retain(|_| {
                    let keep = doomed.next_if_eq(&&position).is_none();
                    position += 1;
                    keep
                });
                positions.len()
            })
            .await?;
        debug!(removed, "Suppression terminée");
        Ok(removed)
    }

    // --- CYCLE CHARGEMENT → MUTATION → ÉCRITURE ---

    async fn lock(&self, collection: &str) -> OwnedMutexGuard<()> {
        self.storage
            .locks
            .collection_lock(collection)
            .lock_owned()
            .await
    }

    async fn load(&self, collection: &str, path: &Path) -> Result<CollectionRecord> {
        if !file_storage::collection_exists(path).await {
            warn!(collection, "Collection introuvable");
            return Err(JsonDbError::CollectionNotFound(collection.to_string()));
        }
        file_storage::read_collection(path).await
    }

    /// Lecture seule sous verrou.
    async fn read(&self, collection: &str) -> Result<CollectionRecord> {
        let path = self.storage.config.collection_path(collection)?;
        let _guard = self.lock(collection).await;
        self.load(collection, &path).await
    }

    /// Lecture, mutation en mémoire puis remplacement atomique du fichier, sous verrou.
    /// Une erreur de lecture ou de parsing interrompt l'opération avant toute écriture.
    async fn mutate<R>(
        &self,
        collection: &str,
        op: impl FnOnce(&mut CollectionRecord) -> R,
    ) -> Result<R> {
        let path = self.storage.config.collection_path(collection)?;
        let _guard = self.lock(collection).await;

        let mut record = self.load(collection, &path).await?;
        let out = op(&mut record);
        file_storage::write_collection(&path, &record).await?;
        Ok(out)
    }
}

fn apply_values(document: &mut Document, values: &Document) {
    for (key, value) in values {
        if key == INDEX_FIELD {
            continue;
        }
        document.insert(key.clone(), value.clone());
    }
}
