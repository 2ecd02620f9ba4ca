//! Local filesystem table source.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;

use super::TableSource;
use crate::error::{Error, Result};

/// Reads Arrow IPC files (`.arrow`, `.ipc`, `.arrows`) from disk.
///
/// Locations are paths, resolved against an optional root directory when
/// relative.
#[derive(Debug, Clone, Default)]
pub struct FileTableSource {
    root: Option<PathBuf>,
}

impl FileTableSource {
    /// Creates a source resolving relative paths against the working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source resolving relative paths against `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// Directory relative paths resolve against, if any.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    fn path_for(&self, location: &str) -> PathBuf {
        let path = Path::new(location);
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[async_trait]
impl TableSource for FileTableSource {
    async fn fetch_bytes(&self, location: &str) -> Result<Bytes> {
        let path = self.path_for(location);
        log::debug!("reading {}", path.display());
        let data = tokio::fs::read(&path)
            .await
            .map_err(|e| Error::io(e, &path))?;
        Ok(Bytes::from(data))
    }
}
