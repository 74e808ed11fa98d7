//! Artifact stores that analyzers read collected output from.
//!
//! A store maps an [`ArtifactKey`] (collector name + file name) to the raw
//! bytes a collector captured. Stores are handed to analyzers explicitly;
//! there is no process-wide registry.
//!
//! ## Implementations
//!
//! - [`MemoryArtifactStore`]: an in-memory map, useful for tests and for
//!   collectors that keep their output in memory
//! - [`DirectoryArtifactStore`]: an extracted bundle directory laid out as
//!   `<root>/<collector_name>/<file_name>`

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::ARTIFACT_KEY_SEPARATOR;
use crate::errors::StoreError;

/// In-memory artifact store
pub mod memory;

/// Bundle-directory artifact store
pub mod directory;

pub use directory::DirectoryArtifactStore;
pub use memory::MemoryArtifactStore;

/// Identifies one stored artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactKey {
    pub collector_name: String,
    pub file_name: String,
}

impl ArtifactKey {
    pub fn new(collector_name: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            collector_name: collector_name.into(),
            file_name: file_name.into(),
        }
    }

    /// The opaque `collector/file` form used for lookups.
    ///
    /// An empty collector name yields just the file name, the same way a path
    /// join with an empty leading segment would.
    pub fn lookup_key(&self) -> String {
        if self.collector_name.is_empty() {
            self.file_name.clone()
        } else {
            format!(
                "{}{}{}",
                self.collector_name, ARTIFACT_KEY_SEPARATOR, self.file_name
            )
        }
    }
}

impl fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lookup_key())
    }
}

/// Source of collected artifact bytes.
#[cfg_attr(test, mockall::automock)]
pub trait ArtifactStore: Send + Sync {
    /// Fetch the bytes stored under `key`, or [`StoreError::NotFound`].
    fn get(&self, key: &ArtifactKey) -> Result<Vec<u8>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_key_joins_with_separator() {
        let key = ArtifactKey::new("text-collector-1", "cfile-1.txt");
        assert_eq!(key.lookup_key(), "text-collector-1/cfile-1.txt");
        assert_eq!(key.to_string(), "text-collector-1/cfile-1.txt");
    }

    #[test]
    fn test_lookup_key_without_collector_name() {
        let key = ArtifactKey::new("", "cluster-info.json");
        assert_eq!(key.lookup_key(), "cluster-info.json");
    }

    #[test]
    fn test_artifact_key_serialization() {
        let key = ArtifactKey::new("run-ping", "run-ping.log");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, r#"{"collectorName":"run-ping","fileName":"run-ping.log"}"#);

        let deserialized: ArtifactKey = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, key);
    }
}
