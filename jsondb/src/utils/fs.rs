// FICHIER : jsondb/src/utils/fs.rs

use crate::utils::{json, Result};
use serde::Serialize;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{instrument, warn};

// --- RE-EXPORTS (Isolation de la couche OS) ---
pub use std::path::{Component, Path, PathBuf};
pub use tokio::fs::ReadDir;

pub async fn exists(path: &Path) -> bool {
    fs::metadata(path).await.is_ok()
}

pub async fn ensure_dir(path: &Path) -> Result<()> {
    if !exists(path).await {
        fs::create_dir_all(path).await?;
    }
    Ok(())
}

#[instrument(skip(path), fields(path = ?path))]
pub async fn read_to_string(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path).await?)
}

pub async fn read_dir(path: &Path) -> Result<ReadDir> {
    Ok(fs::read_dir(path).await?)
}

pub async fn remove_file(path: &Path) -> Result<()> {
    if exists(path).await {
        fs::remove_file(path).await?;
    }
    Ok(())
}

// --- ÉCRITURE ATOMIQUE ---

/// Écriture atomique (write -> sync -> rename).
/// Le fichier cible est soit l'ancien contenu, soit le nouveau : jamais tronqué.
/// En cas d'échec, le fichier temporaire est supprimé.
#[instrument(skip(content, path), fields(path = ?path, bytes = content.len()))]
pub async fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent).await?;
    }

    let tmp_path = path.with_extension("tmp");
    let result = match write_synced(&tmp_path, content).await {
        Ok(()) => fs::rename(&tmp_path, path).await.map_err(Into::into),
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        warn!(tmp = ?tmp_path, error = %e, "écriture atomique échouée, nettoyage du fichier temporaire");
        if fs::metadata(&tmp_path).await.is_ok_and(|m| m.is_file()) {
            let _ = fs::remove_file(&tmp_path).await;
        }
        return Err(e);
    }
    Ok(())
}

async fn write_synced(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(content).await?;
    file.flush().await?;
    // On force l'écriture physique avant le rename
    file.sync_all().await?;
    Ok(())
}

pub async fn write_json_atomic<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let content = json::stringify(data)?;
    write_atomic(path, content.as_bytes()).await
}

/// Un nom de fichier simple : ni séparateur, ni remontée (`..`), ni racine.
pub fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.contains(['/', '\\'])
}
