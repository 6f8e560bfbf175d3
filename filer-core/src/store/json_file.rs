use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tracing::debug;

use super::repository::{StateStore, StoreError};

/// One `<key>.json` document per key inside a directory.
///
/// Writes go through a temporary file in the same directory that is then
/// renamed over the target, so a crash never leaves a half-written document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Opens `dir`, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            StoreError::Io(format!("cannot create store directory '{}': {e}", dir.display()))
        })?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::Configuration(format!("invalid store key '{key}'")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

/// Writes `contents` to a temporary file in `dir` and renames it over `path`.
fn write_atomically(dir: &Path, path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(contents)?;
    temp.flush()?;
    temp.persist(path)
        .map_err(|e| StoreError::Io(format!("cannot replace '{}': {e}", path.display())))?;
    Ok(())
}

#[async_trait]
impl StateStore for JsonFileStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(format!(
                "cannot read '{}': {e}",
                path.display()
            ))),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let (dir, target, contents) = (self.dir.clone(), path.clone(), value.to_owned());
        tokio::task::spawn_blocking(move || write_atomically(&dir, &target, contents.as_bytes()))
            .await
            .map_err(|e| StoreError::Io(format!("write task failed: {e}")))??;
        debug!(key, path = %path.display(), "document written");
        Ok(())
    }

    async fn reset(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(format!(
                "cannot remove '{}': {e}",
                path.display()
            ))),
        }
    }
}
