use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

use crate::errors::StoreError;
use crate::store::{ArtifactKey, ArtifactStore};

/// Artifact store reading from an extracted bundle directory.
///
/// Artifacts live at `<root>/<collector_name>/<file_name>`. Keys are
/// validated lexically before touching the filesystem, and the resolved path
/// is canonicalized before reading, so neither `..` nor a symlink inside the
/// bundle can reach a file outside `root`.
#[derive(Debug, Clone)]
pub struct DirectoryArtifactStore {
    root: PathBuf,
}

impl DirectoryArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `key` to a path under the store root.
    pub fn resolve(&self, key: &ArtifactKey) -> Result<PathBuf, StoreError> {
        if key.file_name.is_empty() {
            return Err(StoreError::InvalidKey {
                key: key.clone(),
                reason: "file name is empty".to_string(),
            });
        }

        let mut resolved = self.root.clone();
        for segment in [&key.collector_name, &key.file_name] {
            for component in Path::new(segment).components() {
                match component {
                    Component::Normal(name) => resolved.push(name),
                    Component::CurDir => {}
                    other => {
                        return Err(StoreError::InvalidKey {
                            key: key.clone(),
                            reason: format!("invalid path component: {:?}", other),
                        });
                    }
                }
            }
        }

        Ok(resolved)
    }

    /// Canonicalize `path` and check that it is still under the store root
    fn contain(&self, key: &ArtifactKey, path: &Path) -> Result<PathBuf, StoreError> {
        let io_error = |source: io::Error| match source.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound(key.clone()),
            _ => StoreError::Io {
                key: key.clone(),
                source,
            },
        };

        let root = self.root.canonicalize().map_err(io_error)?;
        let canonical = path.canonicalize().map_err(io_error)?;

        if !canonical.starts_with(&root) {
            return Err(StoreError::InvalidKey {
                key: key.clone(),
                reason: format!("resolves outside the store root: {}", canonical.display()),
            });
        }

        Ok(canonical)
    }

    /// List every stored artifact, sorted by key.
    ///
    /// Files directly under the root get an empty collector name; deeper files
    /// use their first directory as the collector name and the rest of the
    /// relative path as the file name. Symlinks are listed only when they
    /// point at a file inside the root, matching what [`ArtifactStore::get`]
    /// will serve.
    pub fn keys(&self) -> Result<Vec<ArtifactKey>, StoreError> {
        let mut keys = Vec::new();
        let root_key = ArtifactKey::new("", self.root.to_string_lossy());
        let root = self.root.canonicalize().map_err(|source| StoreError::Io {
            key: root_key.clone(),
            source,
        })?;

        for entry in WalkDir::new(&self.root).follow_links(false) {
            let entry = entry.map_err(|e| StoreError::Io {
                key: root_key.clone(),
                source: e.into(),
            })?;

            let file_type = entry.file_type();
            if file_type.is_symlink() {
                let inside = entry
                    .path()
                    .canonicalize()
                    .map(|target| target.starts_with(&root) && target.is_file())
                    .unwrap_or(false);
                if !inside {
                    debug!("Skipping symlink {} outside bundle", entry.path().display());
                    continue;
                }
            } else if !file_type.is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            let mut components = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned());

            let key = match (components.next(), relative.components().count()) {
                (Some(file_name), 1) => ArtifactKey::new("", file_name),
                (Some(collector_name), _) => {
                    let file_name = components.collect::<Vec<_>>().join("/");
                    ArtifactKey::new(collector_name, file_name)
                }
                (None, _) => continue,
            };
            keys.push(key);
        }

        keys.sort();
        Ok(keys)
    }
}

impl ArtifactStore for DirectoryArtifactStore {
    fn get(&self, key: &ArtifactKey) -> Result<Vec<u8>, StoreError> {
        let path = self.resolve(key)?;
        let path = self.contain(key, &path)?;
        debug!("Reading artifact {} from {}", key, path.display());

        fs::read(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound(key.clone()),
            _ => StoreError::Io {
                key: key.clone(),
                source,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_bundle() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();

        fs::create_dir_all(base.join("run-ping")).unwrap();
        fs::create_dir_all(base.join("cluster-resources/pods")).unwrap();
        fs::write(base.join("run-ping/run-ping.log"), "64 bytes from 8.8.8.8").unwrap();
        fs::write(base.join("cluster-resources/pods/default.json"), "[]").unwrap();
        fs::write(base.join("version.yaml"), "version: 1").unwrap();

        temp_dir
    }

    #[test]
    fn test_get_existing_artifact() {
        let bundle = create_bundle();
        let store = DirectoryArtifactStore::new(bundle.path());

        let content = store.get(&ArtifactKey::new("run-ping", "run-ping.log")).unwrap();
        assert_eq!(content, b"64 bytes from 8.8.8.8".to_vec());
    }

    #[test]
    fn test_get_nested_file_name() {
        let bundle = create_bundle();
        let store = DirectoryArtifactStore::new(bundle.path());

        let content = store
            .get(&ArtifactKey::new("cluster-resources", "pods/default.json"))
            .unwrap();
        assert_eq!(content, b"[]".to_vec());
    }

    #[test]
    fn test_get_root_level_file() {
        let bundle = create_bundle();
        let store = DirectoryArtifactStore::new(bundle.path());

        let content = store.get(&ArtifactKey::new("", "version.yaml")).unwrap();
        assert_eq!(content, b"version: 1".to_vec());
    }

    #[test]
    fn test_missing_artifact_is_not_found() {
        let bundle = create_bundle();
        let store = DirectoryArtifactStore::new(bundle.path());

        let result = store.get(&ArtifactKey::new("run-ping", "missing.log"));
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_parent_traversal_is_rejected() {
        let bundle = create_bundle();
        let store = DirectoryArtifactStore::new(bundle.path().join("run-ping"));

        let result = store.get(&ArtifactKey::new("..", "version.yaml"));
        assert!(matches!(result, Err(StoreError::InvalidKey { .. })));

        let result = store.get(&ArtifactKey::new("run-ping", "../../etc/passwd"));
        assert!(matches!(result, Err(StoreError::InvalidKey { .. })));
    }

    #[test]
    fn test_absolute_file_name_is_rejected() {
        let bundle = create_bundle();
        let store = DirectoryArtifactStore::new(bundle.path());

        let result = store.resolve(&ArtifactKey::new("run-ping", "/etc/passwd"));
        assert!(matches!(result, Err(StoreError::InvalidKey { .. })));
    }

    #[test]
    fn test_empty_file_name_is_rejected() {
        let store = DirectoryArtifactStore::new("/tmp/bundle");
        let result = store.resolve(&ArtifactKey::new("run-ping", ""));
        assert!(matches!(result, Err(StoreError::InvalidKey { .. })));
    }

    #[test]
    fn test_current_dir_components_are_ignored() {
        let store = DirectoryArtifactStore::new("/tmp/bundle");
        let path = store
            .resolve(&ArtifactKey::new("./run-ping", "./run-ping.log"))
            .unwrap();
        assert_eq!(path, PathBuf::from("/tmp/bundle/run-ping/run-ping.log"));
    }

    #[test]
    fn test_keys_lists_all_artifacts_sorted() {
        let bundle = create_bundle();
        let store = DirectoryArtifactStore::new(bundle.path());

        let keys = store.keys().unwrap();
        assert_eq!(
            keys,
            vec![
                ArtifactKey::new("", "version.yaml"),
                ArtifactKey::new("cluster-resources", "pods/default.json"),
                ArtifactKey::new("run-ping", "run-ping.log"),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_outside_root_is_rejected() {
        let bundle = create_bundle();
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("secret"), "top secret").unwrap();
        std::os::unix::fs::symlink(
            outside.path().join("secret"),
            bundle.path().join("run-ping/link"),
        )
        .unwrap();

        let store = DirectoryArtifactStore::new(bundle.path());
        let result = store.get(&ArtifactKey::new("run-ping", "link"));
        assert!(matches!(result, Err(StoreError::InvalidKey { .. })));

        let keys = store.keys().unwrap();
        assert!(!keys.contains(&ArtifactKey::new("run-ping", "link")));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_inside_root_is_served_and_listed() {
        let bundle = create_bundle();
        std::os::unix::fs::symlink(
            bundle.path().join("version.yaml"),
            bundle.path().join("run-ping/version-link"),
        )
        .unwrap();

        let store = DirectoryArtifactStore::new(bundle.path());
        let key = ArtifactKey::new("run-ping", "version-link");

        assert_eq!(store.get(&key).unwrap(), b"version: 1".to_vec());
        assert!(store.keys().unwrap().contains(&key));
    }

    #[test]
    fn test_missing_root_is_not_found() {
        let store = DirectoryArtifactStore::new("/nonexistent/bundle/root");
        let result = store.get(&ArtifactKey::new("run-ping", "run-ping.log"));
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }
}
