use crate::store::error::StoreError;
use log::info;
use std::io;
use std::path::{Path, PathBuf};

const DATA_DIR_NAME: &str = "envsense";

pub fn get_data_dir() -> Result<PathBuf, StoreError> {
    dirs::data_local_dir()
        .map(|p| p.join(DATA_DIR_NAME))
        .ok_or(StoreError::DataDirResolution)
}

pub fn ensure_dir_exists(path: &Path) -> Result<(), StoreError> {
    match std::fs::metadata(path) {
        Ok(metadata) => {
            if !metadata.is_dir() {
                return Err(StoreError::NotADirectory(path.to_path_buf()));
            }
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("Creating data directory: {}", path.display());
            std::fs::create_dir_all(path)
                .map_err(|e| StoreError::DirCreation(path.to_path_buf(), e))
        }
        Err(e) => Err(StoreError::Read(path.to_path_buf(), e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_dir_exists_creates_nested() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");

        ensure_dir_exists(&nested).unwrap();
        assert!(nested.is_dir());
        // Second call is a no-op
        ensure_dir_exists(&nested).unwrap();
    }

    #[test]
    fn test_ensure_dir_exists_rejects_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = ensure_dir_exists(file.path()).unwrap_err();
        assert!(matches!(err, StoreError::NotADirectory(_)));
    }
}
