// src/services/kv_store.rs
use std::path::PathBuf;

use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::error::AppError;

/// JSON document per key under a data directory. Last write wins; there is no
/// locking between writers.
#[derive(Debug, Clone)]
pub struct KvStore {
    dir: PathBuf,
}

impl KvStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, AppError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(AppError::BadRequest(format!("invalid storage key: {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }

    /// Missing or unreadable data reads as `T::default()`.
    pub async fn load<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let path = match self.path_for(key) {
            Ok(path) => path,
            Err(err) => {
                tracing::warn!(%err, "ignoring load of invalid key");
                return T::default();
            }
        };

        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return T::default(),
            Err(err) => {
                tracing::warn!(key, %err, "failed to read stored value, using default");
                return T::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|err| {
            tracing::warn!(key, %err, "stored value is malformed, using default");
            T::default()
        })
    }

    pub async fn save<T>(&self, key: &str, value: &T) -> Result<(), AppError>
    where
        T: Serialize + ?Sized,
    {
        let path = self.path_for(key)?;
        let json = serde_json::to_string_pretty(value)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        // Readers only ever see the old or the new document, never a truncated one.
        let tmp = self.dir.join(format!("{key}.json.{}.tmp", Uuid::new_v4().simple()));
        tokio::fs::write(&tmp, json).await?;
        if let Err(err) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(err.into());
        }
        Ok(())
    }

    pub async fn remove(&self, key: &str) -> Result<bool, AppError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}
