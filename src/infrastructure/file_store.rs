// File-backed implementation of the storage port
use std::fs;
use std::path::PathBuf;

use crate::application::storage_port::StoragePort;
use crate::error::DashboardError;

/// Key-value store keeping one JSON document per key under a root
/// directory. The directory is created on first save.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl StoragePort for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, DashboardError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path).map(Some).map_err(|err| {
            DashboardError::Persistence(format!("read {}: {err}", path.display()))
        })
    }

    fn save(&self, key: &str, value: &str) -> Result<(), DashboardError> {
        fs::create_dir_all(&self.root).map_err(|err| {
            DashboardError::Persistence(format!("create {}: {err}", self.root.display()))
        })?;
        let path = self.path_for(key);
        fs::write(&path, value).map_err(|err| {
            DashboardError::Persistence(format!("write {}: {err}", path.display()))
        })
    }
}
