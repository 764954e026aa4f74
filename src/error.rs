/// State errors raised synchronously by `WorkspaceStore` operations.
/// Recovered at the call site; the aggregate is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("no tab with id {0}")]
    TabNotFound(String),
    #[error("no environment with id {0}")]
    EnvironmentNotFound(String),
    #[error("cannot remove the last remaining tab")]
    CannotRemoveLastTab,
    #[error("no saved request {request_id} in collection {collection_id}")]
    SavedRequestNotFound {
        collection_id: String,
        request_id: String,
    },
}

/// Errors raised while preparing a request for dispatch. Never surfaced to
/// the caller as-is: the executor folds them into a `Failure` result on the
/// tab, like any other failed execution.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid JSON body: {0}")]
    BodyJson(#[from] serde_json::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
