use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::state::workspace::Workspace;

/// Durable storage for the one workspace snapshot. Saving and clearing are
/// best-effort: failures are logged and swallowed, never surfaced. A missing
/// or unreadable snapshot loads as `None`.
pub trait SnapshotStore {
    fn load(&self) -> Option<Workspace>;
    fn save(&self, workspace: &Workspace);
    fn clear(&self);
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for Arc<S> {
    fn load(&self) -> Option<Workspace> {
        (**self).load()
    }

    fn save(&self, workspace: &Workspace) {
        (**self).save(workspace);
    }

    fn clear(&self) {
        (**self).clear();
    }
}

/// Snapshot stored as pretty JSON in a single file.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data_dir>/courier/workspace.json`.
    pub fn default_location() -> Self {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            path: base.join("courier").join("workspace.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save_inner(&self, workspace: &Workspace) -> anyhow::Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let content = serde_json::to_string_pretty(workspace)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl SnapshotStore for FileStore {
    fn load(&self) -> Option<Workspace> {
        let content = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&content) {
            Ok(workspace) => Some(workspace),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "unreadable workspace snapshot, treating as absent");
                None
            }
        }
    }

    fn save(&self, workspace: &Workspace) {
        if let Err(err) = self.save_inner(workspace) {
            warn!(path = %self.path.display(), %err, "failed to persist workspace snapshot");
        }
    }

    fn clear(&self) {
        if let Err(err) = fs::remove_file(&self.path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), %err, "failed to clear workspace snapshot");
            }
        }
    }
}

/// In-process snapshot store, for tests and for embedders that handle
/// persistence themselves.
#[derive(Default)]
pub struct MemoryStore {
    snapshot: Mutex<Option<Workspace>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Option<Workspace> {
        self.snapshot.lock().ok()?.clone()
    }

    fn save(&self, workspace: &Workspace) {
        if let Ok(mut slot) = self.snapshot.lock() {
            *slot = Some(workspace.clone());
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.snapshot.lock() {
            *slot = None;
        }
    }
}
