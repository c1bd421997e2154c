use crate::store::error::StoreError;
use crate::store::KeyValueStore;
use crate::utils::{ensure_dir_exists, get_data_dir};
use log::{debug, info};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

const SESSION_FILE_NAME: &str = "session.json";

/// A store persisted as a flat JSON object in a single file.
///
/// The whole file is loaded on open and rewritten on every change. Writes go to a sibling
/// temporary file first and are then renamed over the original.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens (or starts) the store at `path`. A missing file is an empty store; the file and
    /// its parent directory are created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| StoreError::Decode(path.clone(), e))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No store file at {}, starting empty", path.display());
                BTreeMap::new()
            }
            Err(e) => return Err(StoreError::Read(path, e)),
        };
        Ok(Self { path, entries })
    }

    /// Opens the store in the platform's local data directory
    /// (e.g. `~/.local/share/envsense/session.json` on Linux).
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(get_data_dir()?.join(SESSION_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_dir_exists(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(&self.entries).map_err(StoreError::Encode)?;
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, bytes).map_err(|e| StoreError::Write(tmp_path.clone(), e))?;
        std::fs::rename(&tmp_path, &self.path)
            .map_err(|e| StoreError::Write(self.path.clone(), e))?;
        info!("Saved {} store entries to {}", self.entries.len(), self.path.display());
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist()
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }
}
