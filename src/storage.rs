use crate::errors::AppError;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::{fs, sync::Mutex};
use tracing::warn;

/// Origin-scoped key-value storage with string values.
///
/// The file backend keeps every key in a single JSON object on disk; the
/// memory backend is shared between clones and is what the tests use.
#[derive(Debug, Clone)]
pub enum LocalStorage {
    File(PathBuf),
    Memory(Arc<Mutex<BTreeMap<String, String>>>),
}

impl LocalStorage {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    pub fn memory() -> Self {
        Self::Memory(Arc::default())
    }

    pub async fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
        match self {
            Self::File(path) => {
                let entries = read_entries(path).await?;
                Ok(entries.get(key).cloned())
            }
            Self::Memory(entries) => Ok(entries.lock().await.get(key).cloned()),
        }
    }

    pub async fn set_item(&self, key: &str, value: String) -> Result<(), AppError> {
        match self {
            Self::File(path) => {
                let mut entries = match read_entries(path).await {
                    Ok(entries) => entries,
                    Err(err) => {
                        warn!("replacing unreadable storage file {}: {err}", path.display());
                        BTreeMap::new()
                    }
                };
                entries.insert(key.to_string(), value);

                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent).await?;
                }
                let payload = serde_json::to_vec_pretty(&entries)?;
                fs::write(path, payload).await?;
                Ok(())
            }
            Self::Memory(entries) => {
                entries.lock().await.insert(key.to_string(), value);
                Ok(())
            }
        }
    }
}

async fn read_entries(path: &Path) -> Result<BTreeMap<String, String>, AppError> {
    match fs::read(path).await {
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
        Err(err) => Err(err.into()),
    }
}
