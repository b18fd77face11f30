// FICHIER : jsondb/src/json_db/transactions/lock_manager.rs

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Mutex as AsyncMutex;

/// Gestionnaire de verrous simple (granularité : Collection).
/// Le verrou d'une collection couvre tout le cycle lecture → mutation → écriture.
/// Exclusion intra-processus uniquement : deux processus sur la même racine ne sont pas coordonnés.
#[derive(Debug, Default, Clone)]
pub struct LockManager {
    // Clé = nom de collection
    locks: Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>,
}

impl LockManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Récupère le verrou exclusif d'une collection (créé à la demande).
    pub fn collection_lock(&self, collection: &str) -> Arc<AsyncMutex<()>> {
        // Verrou empoisonné : la map reste cohérente, on récupère son contenu.
        let mut map = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        map.entry(collection.to_string())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    /// Oublie le verrou d'une collection s'il n'est plus détenu ni attendu.
    /// Renvoie `true` si l'entrée a été retirée.
    pub fn release(&self, collection: &str) -> bool {
        let mut map = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        // Seule la map référence encore le verrou
        match map.get(collection) {
            Some(lock) if Arc::strong_count(lock) == 1 => map.remove(collection).is_some(),
            _ => false,
        }
    }

    /// Nombre de collections suivies.
    pub fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
