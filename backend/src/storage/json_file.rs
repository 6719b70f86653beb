//! # JSON File Storage
//!
//! Keeps each store document in its own file under a data directory:
//!
//! ```text
//! data/
//! ├── family-store.json
//! ├── events-store.json
//! ├── gallery-store.json
//! ├── news-store.json
//! └── contact-store.json
//! ```
//!
//! Writes go to a temp file first and are renamed into place.

use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use super::traits::StateStorage;
use crate::error::StoreError;

/// File-backed storage rooted at a base directory
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    base_directory: PathBuf,
}

impl JsonFileStorage {
    /// Create a storage rooted at `base_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self, StoreError> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of the document for a store key
    pub fn document_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::Storage(format!("invalid storage key '{}'", key)));
        }
        Ok(self.base_directory.join(format!("{}.json", key)))
    }
}

impl StateStorage for JsonFileStorage {
    fn load_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.document_path(key)?;
        if !path.exists() {
            debug!("No document at {:?}", path);
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn save_raw(&self, key: &str, document: &str) -> Result<(), StoreError> {
        let path = self.document_path(key)?;

        if !self.base_directory.exists() {
            fs::create_dir_all(&self.base_directory)?;
        }

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, document)?;
        fs::rename(&temp_path, &path)?;

        debug!("Wrote {:?}", path);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let path = self.document_path(key)?;
        if path.exists() {
            fs::remove_file(&path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
