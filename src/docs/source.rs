//! Document loading.
//!
//! # Responsibilities
//! - Enumerate the documentation corpus
//! - Return raw bytes keyed by canonical name
//!
//! # Design Decisions
//! - Flat directory, `*.md` only; the file name is the canonical name
//! - Hidden files and subdirectories are skipped
//! - Sources return names in no particular order; the index sorts

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// A document as read from storage, before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub name: String,
    pub source: Vec<u8>,
}

impl RawDocument {
    pub fn new(name: impl Into<String>, source: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }
}

/// Errors that can occur while loading documents.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read document directory {path:?}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read document {path:?}: {source}")]
    Document {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Supplies the raw documentation corpus.
pub trait DocumentSource: Send + Sync {
    fn load_all(&self) -> Result<Vec<RawDocument>, LoadError>;

    /// Filesystem root, if the source is backed by one.
    fn root(&self) -> Option<&Path> {
        None
    }
}

/// Reads `*.md` files from a single directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    base: PathBuf,
}

impl DirectorySource {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

impl DocumentSource for DirectorySource {
    fn load_all(&self) -> Result<Vec<RawDocument>, LoadError> {
        let entries = fs::read_dir(&self.base).map_err(|source| LoadError::Directory {
            path: self.base.clone(),
            source,
        })?;

        let mut docs = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| LoadError::Directory {
                path: self.base.clone(),
                source,
            })?;
            let path = entry.path();

            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                tracing::warn!(path = ?path, "Skipping document with non UTF-8 name");
                continue;
            };
            if name.starts_with('.') || !name.ends_with(".md") || !path.is_file() {
                continue;
            }

            let source = fs::read(&path).map_err(|source| LoadError::Document {
                path: path.clone(),
                source,
            })?;
            docs.push(RawDocument::new(name, source));
        }

        tracing::debug!(path = ?self.base, count = docs.len(), "Documents loaded");
        Ok(docs)
    }

    fn root(&self) -> Option<&Path> {
        Some(&self.base)
    }
}

/// Fixed in-memory corpus.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    docs: Vec<RawDocument>,
}

impl MemorySource {
    pub fn new(docs: Vec<RawDocument>) -> Self {
        Self { docs }
    }
}

impl DocumentSource for MemorySource {
    fn load_all(&self) -> Result<Vec<RawDocument>, LoadError> {
        Ok(self.docs.clone())
    }
}
