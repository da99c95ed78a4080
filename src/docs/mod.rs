//! Documentation corpus subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     source.rs (read *.md from the doc directory)
//!     → render.rs (Markdown → HTML, title from first heading)
//!     → document.rs (immutable DocumentIndex, sorted by name)
//!     → resolver.rs (ArcSwap<DocumentIndex>)
//!
//! Per request:
//!     resolver.list() / resolver.get(name) on a lock-free snapshot
//!
//! On change (optional):
//!     watcher.rs detects change
//!     → resolver.reload() builds a new index
//!     → atomic swap; in-flight readers keep their snapshot
//! ```

pub mod document;
pub mod render;
pub mod resolver;
pub mod source;
pub mod watcher;

pub use document::{Document, DocumentIndex};
pub use render::{MarkdownRenderer, MarkupRenderer, Rendered};
pub use resolver::{ContentResolver, ListingEntry};
pub use source::{DirectorySource, DocumentSource, LoadError, MemorySource, RawDocument};
pub use watcher::DocsWatcher;
