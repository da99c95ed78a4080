//! Documentation directory watcher for hot reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::docs::resolver::ContentResolver;

/// Rebuilds the document index whenever the watched directory changes.
pub struct DocsWatcher {
    path: PathBuf,
    resolver: Arc<ContentResolver>,
}

impl DocsWatcher {
    pub fn new(path: &Path, resolver: Arc<ContentResolver>) -> Self {
        Self {
            path: path.to_path_buf(),
            resolver,
        }
    }

    /// Start watching in a background thread.
    ///
    /// The returned watcher must be kept alive for as long as reloads are wanted.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let resolver = self.resolver;

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() || event.kind.is_remove() {
                        tracing::info!(paths = ?event.paths, "Documentation change detected, reloading");
                        match resolver.reload() {
                            Ok(count) => tracing::debug!(documents = count, "Reload complete"),
                            Err(e) => tracing::error!(
                                error = %e,
                                "Failed to reload documents, keeping current index"
                            ),
                        }
                    }
                }
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Documentation watcher started");
        Ok(watcher)
    }
}
