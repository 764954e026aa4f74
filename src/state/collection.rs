use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::tab::{HttpMethod, KeyValuePair, Tab};

/// Named, ordered group of saved request snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
    pub requests: Vec<SavedRequest>,
}

impl Collection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            requests: Vec::new(),
        }
    }
}

/// Immutable snapshot of a tab's request-defining fields at save time.
/// `response` and `loading` are deliberately not captured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRequest {
    pub id: String,
    pub name: String,
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<KeyValuePair>,
    pub body: String,
    pub params: Vec<KeyValuePair>,
    pub created_at: DateTime<Utc>,
}

impl SavedRequest {
    pub fn from_tab(tab: &Tab) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: tab.name.clone(),
            method: tab.method,
            url: tab.url.clone(),
            headers: tab.headers.clone(),
            body: tab.body.clone(),
            params: tab.params.clone(),
            created_at: Utc::now(),
        }
    }
}
