use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::common::{self, debug, ErrorKind, Time};
use crate::core::Credential;
use crate::Result;

/// Durable slot holding the bearer credential across restarts.
///
/// No validation happens here.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn read(&self) -> Result<Option<Credential>>;
    async fn write(&self, credential: &Credential) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSession {
    token: Credential,
    saved_at: Time,
}

/// Keeps the credential in a single file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_file(&self) -> common::Result<Option<Credential>> {
        let buf = match fs::read(&self.path).await {
            Ok(buf) => buf,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let stored: StoredSession =
            serde_json::from_slice(&buf).map_err(|err| ErrorKind::SessionDecode {
                description: format!("{}: {}", self.path.display(), err),
            })?;
        debug!(path=%self.path.display(), saved_at=%stored.saved_at, "Read session");

        Ok(Some(stored.token))
    }

    async fn write_file(&self, credential: &Credential) -> common::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let stored = StoredSession {
            token: credential.clone(),
            saved_at: chrono::Utc::now(),
        };
        let buf = serde_json::to_vec(&stored)?;

        // Readers never observe a partially written slot.
        let tmp = self.path.with_extension("tmp");
        if let Err(err) = fs::remove_file(&tmp).await {
            if err.kind() != std::io::ErrorKind::NotFound {
                return Err(err.into());
            }
        }
        let mut options = fs::OpenOptions::new();
        options.write(true).create_new(true);
        // The token is only readable by its owner.
        #[cfg(unix)]
        options.mode(0o600);
        let mut file = options.open(&tmp).await?;
        file.write_all(&buf).await?;
        file.sync_all().await?;
        drop(file);
        fs::rename(&tmp, &self.path).await?;

        Ok(())
    }

    async fn remove_file(&self) -> common::Result<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl SessionStore for FileStore {
    async fn read(&self) -> Result<Option<Credential>> {
        Ok(self.read_file().await?)
    }

    async fn write(&self, credential: &Credential) -> Result<()> {
        Ok(self.write_file(credential).await?)
    }

    async fn clear(&self) -> Result<()> {
        Ok(self.remove_file().await?)
    }
}

/// In process slot. Clones share the same slot, which lets a second
/// authenticator observe what the first one persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<Credential>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: Credential) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(credential))),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Credential>> {
        self.slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn read(&self) -> Result<Option<Credential>> {
        Ok(self.lock().clone())
    }

    async fn write(&self, credential: &Credential) -> Result<()> {
        *self.lock() = Some(credential.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.lock().take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("session"));

        assert_eq!(store.read().await.unwrap(), None);

        store.write(&Credential::new("token-1")).await.unwrap();
        assert_eq!(store.read().await.unwrap(), Some(Credential::new("token-1")));

        store.clear().await.unwrap();
        assert_eq!(store.read().await.unwrap(), None);
        // Clearing an empty slot is fine.
        store.clear().await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn file_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session");
        let store = FileStore::new(&path);

        store.write(&Credential::new("token-1")).await.unwrap();
        store.write(&Credential::new("token-2")).await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.read().await.unwrap(), Some(Credential::new("token-2")));
    }

    #[tokio::test]
    async fn file_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session");
        std::fs::write(&path, b"not json").unwrap();

        assert!(FileStore::new(path).read().await.is_err());
    }

    #[tokio::test]
    async fn memory_store_clones_share_slot() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.write(&Credential::new("t")).await.unwrap();
        assert_eq!(other.read().await.unwrap(), Some(Credential::new("t")));

        other.clear().await.unwrap();
        assert_eq!(store.read().await.unwrap(), None);
    }
}
