//! Content resolution.
//!
//! # Responsibilities
//! - Own the document index
//! - Answer listing and exact-name lookups
//! - Rebuild the index on demand
//!
//! # Design Decisions
//! - The index sits behind `ArcSwap`: lookups take a lock-free snapshot
//! - Reloads build a complete new index and swap the reference; readers never
//!   observe a partially built index
//! - A failed reload leaves the current index in place

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::docs::document::{Document, DocumentIndex};
use crate::docs::render::MarkupRenderer;
use crate::docs::source::{DocumentSource, LoadError};
use crate::error::FrontendError;
use crate::observability::metrics;

/// One line of the document listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub title: String,
}

/// Maps document names to rendered documents.
pub struct ContentResolver {
    index: ArcSwap<DocumentIndex>,
    source: Arc<dyn DocumentSource>,
    renderer: Arc<dyn MarkupRenderer>,
}

impl ContentResolver {
    /// Load the corpus from `source` and build the initial index.
    pub fn load(
        source: Arc<dyn DocumentSource>,
        renderer: Arc<dyn MarkupRenderer>,
    ) -> Result<Self, LoadError> {
        let index = DocumentIndex::build(source.load_all()?, renderer.as_ref());
        tracing::info!(documents = index.len(), "Document index built");
        metrics::record_documents(index.len());

        Ok(Self {
            index: ArcSwap::from_pointee(index),
            source,
            renderer,
        })
    }

    /// Current index snapshot.
    pub fn snapshot(&self) -> Arc<DocumentIndex> {
        self.index.load_full()
    }

    /// All documents, sorted by name.
    pub fn list(&self) -> Vec<ListingEntry> {
        self.index
            .load()
            .iter()
            .map(|doc| ListingEntry {
                name: doc.name().to_string(),
                title: doc.title().to_string(),
            })
            .collect()
    }

    /// Exact-name lookup.
    pub fn get(&self, name: &str) -> Result<Arc<Document>, FrontendError> {
        self.index
            .load()
            .get(name)
            .ok_or_else(|| FrontendError::DocumentNotFound(name.to_string()))
    }

    /// Rebuild from the source and swap the new index in.
    ///
    /// Returns the number of documents in the new index.
    pub fn reload(&self) -> Result<usize, LoadError> {
        let raw = self.source.load_all()?;
        let index = DocumentIndex::build(raw, self.renderer.as_ref());
        let count = index.len();
        self.replace(index);
        Ok(count)
    }

    /// Atomically replace the index.
    pub fn replace(&self, index: DocumentIndex) {
        let count = index.len();
        self.index.store(Arc::new(index));
        metrics::record_documents(count);
        tracing::info!(documents = count, "Document index replaced");
    }

    pub fn source(&self) -> &Arc<dyn DocumentSource> {
        &self.source
    }
}
