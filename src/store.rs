//! Read-only access to the files under the document root.

use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while looking up a resource.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No regular file exists at the key.
    #[error("not found: {0}")]
    NotFound(String),

    /// The key is empty or would leave the document root.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// The file exists but reading it failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Whether the lookup should be answered as "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_) | StoreError::InvalidPath(_))
    }
}

/// A file read from the store.
#[derive(Debug, Clone)]
pub struct Resource {
    /// Full path on disk
    pub path: PathBuf,
    /// File contents
    pub content: Bytes,
}

impl Resource {
    /// Final component of the file's path.
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }
}

/// Directory under which store keys are resolved.
#[derive(Debug, Clone)]
pub struct DocumentRoot {
    root: PathBuf,
}

impl DocumentRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Maps a store key to a path under the root.
    ///
    /// Only normal components are accepted; `..`, absolute paths and empty
    /// keys are rejected. Symlinks are not inspected here; [`Self::open`]
    /// checks where they lead.
    pub fn resolve(&self, key: &str) -> StoreResult<PathBuf> {
        let relative = Path::new(key);
        let mut has_component = false;

        for component in relative.components() {
            match component {
                Component::Normal(_) => has_component = true,
                Component::CurDir => {}
                _ => return Err(StoreError::InvalidPath(key.to_string())),
            }
        }

        if !has_component {
            return Err(StoreError::InvalidPath(key.to_string()));
        }

        Ok(self.root.join(relative))
    }

    /// Canonicalizes `path` and checks it is still under the canonical root.
    async fn contain(&self, key: &str, path: &Path) -> StoreResult<PathBuf> {
        let not_found = |_| StoreError::NotFound(key.to_string());
        let root = tokio::fs::canonicalize(&self.root).await.map_err(not_found)?;
        let real = tokio::fs::canonicalize(path).await.map_err(not_found)?;

        if !real.starts_with(&root) {
            return Err(StoreError::InvalidPath(key.to_string()));
        }
        Ok(real)
    }

    /// Reads the regular file at `key` in full.
    ///
    /// Any failure to stat the path, or a path that is not a regular file,
    /// is reported as [`StoreError::NotFound`]. Symlinks are followed, but a
    /// target outside the root is [`StoreError::InvalidPath`]. Only a failed
    /// read of an existing file is [`StoreError::Io`].
    pub async fn open(&self, key: &str) -> StoreResult<Resource> {
        let path = self.resolve(key)?;

        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => {}
            _ => return Err(StoreError::NotFound(key.to_string())),
        }

        let real = self.contain(key, &path).await?;
        let content = tokio::fs::read(&real).await?;

        Ok(Resource {
            path,
            content: Bytes::from(content),
        })
    }
}
