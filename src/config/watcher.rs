//! Configuration file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::config::loader::{apply_config, load_config};
use crate::registry::Registry;

/// Re-applies a configuration file to a registry whenever it changes.
pub struct ConfigWatcher {
    path: PathBuf,
    registry: Arc<Registry>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    pub fn new(path: &Path, registry: Arc<Registry>) -> Self {
        Self {
            path: path.to_path_buf(),
            registry,
        }
    }

    /// Start watching the file in a background thread.
    ///
    /// Watching stops when the returned watcher is dropped. A file that fails to load
    /// keeps the current registry entries.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let path = self.path.clone();
        let registry = self.registry;

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!("Config file change detected, reloading...");
                        match load_config(&path).and_then(|config| apply_config(&config, &registry))
                        {
                            Ok(()) => {}
                            Err(e) => {
                                tracing::error!(
                                    "Failed to reload config: {}. Keeping current loggers.",
                                    e
                                );
                            }
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Config watcher started");
        Ok(watcher)
    }
}
