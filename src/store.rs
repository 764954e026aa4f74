use std::collections::HashMap;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::error::StoreError;
use crate::state::collection::{Collection, SavedRequest};
use crate::state::environment::EnvVariable;
use crate::state::response::ExecutionResult;
use crate::state::tab::{Tab, TabPatch};
use crate::state::workspace::Workspace;
use crate::storage::SnapshotStore;

/// Emitted after every successful mutation. Subscribers re-read the store;
/// the event itself carries no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    WorkspaceChanged,
}

/// Where a saved request should land. A target that does not exist yet gets
/// created on the fly.
#[derive(Debug, Clone)]
pub enum CollectionTarget {
    Id(String),
    Named(String),
}

/// Everything one execution needs, captured atomically when the tab is marked
/// in-flight: a clone of the draft, the workspace base URL, and the active
/// environment's variables.
#[derive(Debug, Clone)]
pub struct ExecutionInput {
    pub tab: Tab,
    pub base_url: String,
    pub variables: HashMap<String, String>,
}

/// Sole owner and sole mutator of the [`Workspace`] aggregate. Every
/// operation either applies fully (then persists a snapshot and notifies
/// subscribers) or returns an error with the aggregate untouched.
pub struct WorkspaceStore {
    workspace: Workspace,
    storage: Box<dyn SnapshotStore + Send>,
    subscribers: Vec<UnboundedSender<StoreEvent>>,
}

impl WorkspaceStore {
    /// Restore from the snapshot store. Absent, unreadable, or
    /// invariant-breaking snapshots all fall back to the seeded first-run
    /// workspace.
    pub fn new(storage: Box<dyn SnapshotStore + Send>) -> Self {
        let workspace = storage
            .load()
            .filter(Workspace::is_consistent)
            .unwrap_or_else(Workspace::seeded);
        Self {
            workspace,
            storage,
            subscribers: Vec::new(),
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn subscribe(&mut self) -> UnboundedReceiver<StoreEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    fn committed(&mut self) {
        self.storage.save(&self.workspace);
        self.subscribers
            .retain(|tx| tx.send(StoreEvent::WorkspaceChanged).is_ok());
    }

    // --- tabs ---

    /// Append a fresh default tab and make it active. Returns the new tab's id.
    pub fn add_tab(&mut self) -> String {
        let tab = Tab::new(format!("Request {}", self.workspace.tabs.len() + 1));
        let id = tab.id.clone();
        self.workspace.tabs.push(tab);
        self.workspace.active_tab_id = id.clone();
        self.committed();
        id
    }

    /// Close a tab. Refused on the sole remaining tab. When the active tab is
    /// removed, the first remaining tab (in current order) becomes active.
    pub fn remove_tab(&mut self, id: &str) -> Result<(), StoreError> {
        if self.workspace.tabs.len() <= 1 {
            return Err(StoreError::CannotRemoveLastTab);
        }
        let idx = self.tab_index(id)?;
        self.workspace.tabs.remove(idx);
        if self.workspace.active_tab_id == id {
            self.workspace.active_tab_id = self.workspace.tabs[0].id.clone();
        }
        self.committed();
        Ok(())
    }

    /// Merge the patch into the matching tab. Strict contract: an unknown id
    /// is an error, not a silent no-op.
    pub fn update_tab(&mut self, id: &str, patch: TabPatch) -> Result<(), StoreError> {
        let idx = self.tab_index(id)?;
        patch.apply_to(&mut self.workspace.tabs[idx]);
        self.committed();
        Ok(())
    }

    pub fn set_active_tab(&mut self, id: &str) -> Result<(), StoreError> {
        self.tab_index(id)?;
        self.workspace.active_tab_id = id.to_string();
        self.committed();
        Ok(())
    }

    // --- collections ---

    /// Create an empty collection; returns its id.
    pub fn create_collection(&mut self, name: impl Into<String>) -> String {
        let collection = Collection::new(name);
        let id = collection.id.clone();
        self.workspace.collections.push(collection);
        self.committed();
        id
    }

    /// No-op when the id is unknown.
    pub fn delete_collection(&mut self, id: &str) {
        let before = self.workspace.collections.len();
        self.workspace.collections.retain(|c| c.id != id);
        if self.workspace.collections.len() != before {
            self.committed();
        }
    }

    /// Snapshot the tab's request-defining fields into the target collection,
    /// creating the collection when the target does not exist. Returns the id
    /// of the collection written to.
    pub fn save_to_collection(
        &mut self,
        tab_id: &str,
        target: CollectionTarget,
    ) -> Result<String, StoreError> {
        let idx = self.tab_index(tab_id)?;
        let request = SavedRequest::from_tab(&self.workspace.tabs[idx]);

        let existing = match &target {
            CollectionTarget::Id(id) => self.workspace.collections.iter_mut().find(|c| c.id == *id),
            CollectionTarget::Named(name) => {
                self.workspace.collections.iter_mut().find(|c| c.name == *name)
            }
        };

        let id = match existing {
            Some(collection) => {
                collection.requests.push(request);
                collection.id.clone()
            }
            None => {
                let name = match target {
                    CollectionTarget::Id(id) => id,
                    CollectionTarget::Named(name) => name,
                };
                let mut collection = Collection::new(name);
                let id = collection.id.clone();
                collection.requests.push(request);
                self.workspace.collections.push(collection);
                id
            }
        };

        self.committed();
        Ok(id)
    }

    /// Copy a saved request's draft fields into the active tab, preserving
    /// the tab's id, response, and loading flag.
    pub fn load_saved_request(
        &mut self,
        collection_id: &str,
        request_id: &str,
    ) -> Result<(), StoreError> {
        let saved = self
            .workspace
            .collection(collection_id)
            .and_then(|c| c.requests.iter().find(|r| r.id == request_id))
            .cloned()
            .ok_or_else(|| StoreError::SavedRequestNotFound {
                collection_id: collection_id.to_string(),
                request_id: request_id.to_string(),
            })?;

        let active_id = self.workspace.active_tab_id.clone();
        let idx = self.tab_index(&active_id)?;
        let tab = &mut self.workspace.tabs[idx];
        tab.name = saved.name;
        tab.method = saved.method;
        tab.url = saved.url;
        tab.headers = saved.headers;
        tab.params = saved.params;
        tab.body = saved.body;
        self.committed();
        Ok(())
    }

    // --- environments ---

    pub fn set_active_environment(&mut self, id: &str) -> Result<(), StoreError> {
        if self.workspace.environment(id).is_none() {
            return Err(StoreError::EnvironmentNotFound(id.to_string()));
        }
        self.workspace.active_environment_id = id.to_string();
        self.committed();
        Ok(())
    }

    /// Replace an environment's variable rows.
    pub fn update_environment(
        &mut self,
        id: &str,
        variables: Vec<EnvVariable>,
    ) -> Result<(), StoreError> {
        let env = self
            .workspace
            .environments
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| StoreError::EnvironmentNotFound(id.to_string()))?;
        env.variables = variables;
        self.committed();
        Ok(())
    }

    // --- workspace-level settings ---

    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.workspace.base_url = base_url.into();
        self.committed();
    }

    pub fn toggle_theme(&mut self) {
        self.workspace.theme = self.workspace.theme.toggled();
        self.committed();
    }

    // --- execution hooks ---

    /// Mark the tab in-flight and capture everything the pipeline needs, in
    /// one atomic step.
    pub fn begin_execution(&mut self, tab_id: &str) -> Result<ExecutionInput, StoreError> {
        let idx = self.tab_index(tab_id)?;
        self.workspace.tabs[idx].loading = true;
        let tab = self.workspace.tabs[idx].clone();
        let base_url = self.workspace.base_url.clone();
        let variables = self
            .workspace
            .active_environment()
            .map(|e| e.variable_map())
            .unwrap_or_default();
        self.committed();
        Ok(ExecutionInput {
            tab,
            base_url,
            variables,
        })
    }

    /// Write the result back and clear the in-flight flag, atomically. A late
    /// result for a tab that has since been closed is dropped.
    pub fn finish_execution(&mut self, tab_id: &str, result: ExecutionResult) {
        let Ok(idx) = self.tab_index(tab_id) else {
            debug!(tab = tab_id, "discarding result for a closed tab");
            return;
        };
        let tab = &mut self.workspace.tabs[idx];
        tab.response = Some(result);
        tab.loading = false;
        self.committed();
    }

    fn tab_index(&self, id: &str) -> Result<usize, StoreError> {
        self.workspace
            .tabs
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::TabNotFound(id.to_string()))
    }
}
