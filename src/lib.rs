//! Core engine for an HTTP request workbench: open request drafts ("tabs"),
//! saved collections, switchable environments, and a one-shot execution
//! pipeline with normalized results.
//!
//! Presentation layers (TUI, GUI, anything) consume this crate through
//! [`store::WorkspaceStore`] and [`executor::Executor`]; nothing in here
//! renders.

pub mod env;
pub mod error;
pub mod executor;
pub mod http;
pub mod state;
pub mod storage;
pub mod store;

pub use error::{EngineError, StoreError};
pub use executor::Executor;
pub use state::collection::{Collection, SavedRequest};
pub use state::environment::{EnvVariable, Environment};
pub use state::response::{ExecutionResult, FailureResponse, SuccessResponse};
pub use state::tab::{HttpMethod, KeyValuePair, Tab, TabPatch};
pub use state::workspace::{Theme, Workspace};
pub use storage::{FileStore, MemoryStore, SnapshotStore};
pub use store::{CollectionTarget, ExecutionInput, StoreEvent, WorkspaceStore};
