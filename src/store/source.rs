//! Data sources the post store reads from

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::content::PostIndex;

/// Errors raised while loading the persisted index
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read index {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("failed to parse index {path:?}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Where the store gets its index and post bodies from
pub trait PostSource {
    /// Load the whole index. Called once when the store is opened.
    fn load(&self) -> Result<PostIndex, StoreError>;

    /// Read the raw file stored at an index entry's `path`
    fn read_content(&self, path: &str) -> io::Result<String>;
}

/// Reads the JSON index written by the builder and post files relative to the site base directory
#[derive(Debug, Clone)]
pub struct FileSource {
    index_path: PathBuf,
    base_dir: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(index_path: P, base_dir: Q) -> Self {
        Self {
            index_path: index_path.as_ref().to_path_buf(),
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }
}

impl PostSource for FileSource {
    fn load(&self) -> Result<PostIndex, StoreError> {
        let json = fs::read_to_string(&self.index_path).map_err(|source| StoreError::Io {
            path: self.index_path.clone(),
            source,
        })?;
        let index = PostIndex::from_json(&json).map_err(|source| StoreError::Json {
            path: self.index_path.clone(),
            source,
        })?;
        tracing::debug!("Loaded {} posts from {:?}", index.len(), self.index_path);
        Ok(index)
    }

    fn read_content(&self, path: &str) -> io::Result<String> {
        fs::read_to_string(self.base_dir.join(path))
    }
}

/// In-memory index and files, for fixtures
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    index: PostIndex,
    files: HashMap<String, String>,
}

impl MemorySource {
    pub fn new(index: PostIndex) -> Self {
        Self {
            index,
            files: HashMap::new(),
        }
    }

    /// Register the raw contents served for `path`
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }
}

impl PostSource for MemorySource {
    fn load(&self) -> Result<PostIndex, StoreError> {
        Ok(self.index.clone())
    }

    fn read_content(&self, path: &str) -> io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.to_string()))
    }
}
