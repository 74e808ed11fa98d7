use std::collections::HashMap;

use crate::errors::StoreError;
use crate::store::{ArtifactKey, ArtifactStore};

/// Artifact store backed by a map of lookup keys to bytes
#[derive(Debug, Clone, Default)]
pub struct MemoryArtifactStore {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryArtifactStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `content` under `key`, replacing any previous value
    pub fn insert(&mut self, key: ArtifactKey, content: impl Into<Vec<u8>>) {
        self.files.insert(key.lookup_key(), content.into());
    }

    pub fn contains(&self, key: &ArtifactKey) -> bool {
        self.files.contains_key(&key.lookup_key())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl ArtifactStore for MemoryArtifactStore {
    fn get(&self, key: &ArtifactKey) -> Result<Vec<u8>, StoreError> {
        self.files
            .get(&key.lookup_key())
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.clone()))
    }
}

impl<C: Into<Vec<u8>>> FromIterator<(ArtifactKey, C)> for MemoryArtifactStore {
    fn from_iter<I: IntoIterator<Item = (ArtifactKey, C)>>(iter: I) -> Self {
        let mut store = Self::new();
        for (key, content) in iter {
            store.insert(key, content);
        }
        store
    }
}
