use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::traits::StateStorage;
use crate::error::StoreError;

/// Storage that keeps documents in memory, for tests and throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryStorage {
    documents: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.lock().map(|documents| documents.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.documents
            .lock()
            .map_err(|_| StoreError::Storage("memory storage lock poisoned".to_string()))
    }
}

impl StateStorage for MemoryStorage {
    fn load_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn save_raw(&self, key: &str, document: &str) -> Result<(), StoreError> {
        self.lock()?.insert(key.to_string(), document.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.lock()?.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert!(storage.is_empty());

        storage.save_raw("contact-store", "{}").unwrap();
        storage.save_raw("contact-store", "{\"contacts\":[]}").unwrap();

        assert_eq!(storage.len(), 1);
        assert_eq!(
            storage.load_raw("contact-store").unwrap().as_deref(),
            Some("{\"contacts\":[]}")
        );
        assert!(storage.remove("contact-store").unwrap());
        assert!(storage.is_empty());
    }
}
