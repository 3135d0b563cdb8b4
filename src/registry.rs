use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// The run registry: every temp path the run has ever created, appended
/// to only by the orchestrator after a task reports a path back to it.
/// Cleared by the Janitor on both success and failure.
#[derive(Clone, Default)]
pub(crate) struct Registry {
    paths: Arc<Mutex<Vec<PathBuf>>>,
}

impl Registry {
    pub(crate) fn new() -> Registry {
        Registry::default()
    }

    pub(crate) fn track(&self, path: PathBuf) {
        self.paths.lock().unwrap().push(path);
    }

    pub(crate) fn track_all(&self, paths: impl IntoIterator<Item = PathBuf>) {
        self.paths.lock().unwrap().extend(paths);
    }

    /// Remove `path` from the registry, e.g. once it has been renamed
    /// onto the final output and no longer needs cleanup.
    pub(crate) fn untrack(&self, path: &Path) {
        let mut paths = self.paths.lock().unwrap();
        if let Some(pos) = paths.iter().position(|p| p == path) {
            paths.remove(pos);
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.paths.lock().unwrap().is_empty()
    }

    /// Best-effort delete every tracked path. Missing files are ignored;
    /// any other deletion error is logged and suppressed so that one bad
    /// path never stops the cleanup of the rest. Idempotent: paths are
    /// drained from the registry as they are processed.
    pub(crate) fn cleanup(&self) {
        let paths = std::mem::take(&mut *self.paths.lock().unwrap());
        for path in paths {
            match std::fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    log::warn!("Failed to remove temp file {}: {}", path.display(), e);
                }
            }
        }
    }
}
