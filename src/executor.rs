use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use tracing::debug;

use crate::error::StoreError;
use crate::http::builder::prepare;
use crate::http::client::build_client;
use crate::http::dispatcher::dispatch;
use crate::state::response::ExecutionResult;
use crate::store::WorkspaceStore;

/// Drives one tab through the execution pipeline: variable substitution,
/// dispatch, and the write-back of the normalized result. The store lock is
/// never held across the network await, so executions on different tabs
/// proceed independently while store mutations stay serialized.
pub struct Executor {
    store: Arc<Mutex<WorkspaceStore>>,
    client: reqwest::Client,
}

impl Executor {
    pub fn new(store: Arc<Mutex<WorkspaceStore>>) -> Self {
        Self {
            store,
            client: build_client(),
        }
    }

    pub fn store(&self) -> &Arc<Mutex<WorkspaceStore>> {
        &self.store
    }

    /// Execute the tab with the given id against the active environment.
    /// `Err` only for an unknown tab; every body-parse and transport problem
    /// lands in the tab's `response` as a `Failure` result.
    pub async fn execute_tab(&self, tab_id: &str) -> Result<(), StoreError> {
        let input = self.lock_store().begin_execution(tab_id)?;
        let started = Instant::now();

        debug!(
            tab = tab_id,
            method = input.tab.method.as_str(),
            "executing request"
        );

        let result = match prepare(&input.tab, &input.base_url, &input.variables) {
            Ok(prepared) => dispatch(&self.client, prepared, started).await,
            Err(err) => {
                ExecutionResult::failure(err.to_string(), started.elapsed().as_millis() as u64)
            }
        };

        self.lock_store().finish_execution(tab_id, result);
        Ok(())
    }

    fn lock_store(&self) -> MutexGuard<'_, WorkspaceStore> {
        self.store
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
