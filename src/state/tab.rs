use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::response::ExecutionResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }

    /// GET and DELETE never carry a request body; every other method does.
    pub fn sends_body(&self) -> bool {
        !matches!(self, HttpMethod::Get | HttpMethod::Delete)
    }
}

/// One header or query-parameter row. Disabled rows are kept in the draft but
/// dropped at dispatch time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValuePair {
    pub key: String,
    pub value: String,
    pub enabled: bool,
}

impl Default for KeyValuePair {
    fn default() -> Self {
        Self {
            key: String::new(),
            value: String::new(),
            enabled: true,
        }
    }
}

impl KeyValuePair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: true,
        }
    }
}

/// One open, editable request draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    pub id: String,
    pub name: String,
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<KeyValuePair>,
    pub params: Vec<KeyValuePair>,
    /// Raw body text; parsed as JSON at dispatch time for methods that send one.
    pub body: String,
    /// Outcome of the most recent execution. Replaced wholesale on each run.
    pub response: Option<ExecutionResult>,
    pub loading: bool,
}

impl Tab {
    /// Fresh draft: method GET, one `Content-Type: application/json` header,
    /// one empty parameter row, an empty JSON object body.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            method: HttpMethod::Get,
            url: String::new(),
            headers: vec![KeyValuePair::new("Content-Type", "application/json")],
            params: vec![KeyValuePair::default()],
            body: String::from("{\n  \n}"),
            response: None,
            loading: false,
        }
    }
}

/// Enumerated partial update for a tab's draft fields. `response` and
/// `loading` are owned by the execution pipeline and cannot be patched.
#[derive(Debug, Clone, Default)]
pub struct TabPatch {
    pub name: Option<String>,
    pub method: Option<HttpMethod>,
    pub url: Option<String>,
    pub headers: Option<Vec<KeyValuePair>>,
    pub params: Option<Vec<KeyValuePair>>,
    pub body: Option<String>,
}

impl TabPatch {
    pub fn apply_to(self, tab: &mut Tab) {
        if let Some(name) = self.name {
            tab.name = name;
        }
        if let Some(method) = self.method {
            tab.method = method;
        }
        if let Some(url) = self.url {
            tab.url = url;
        }
        if let Some(headers) = self.headers {
            tab.headers = headers;
        }
        if let Some(params) = self.params {
            tab.params = params;
        }
        if let Some(body) = self.body {
            tab.body = body;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tab_seed() {
        let tab = Tab::new("New Request");
        assert_eq!(tab.method, HttpMethod::Get);
        assert_eq!(tab.headers.len(), 1);
        assert_eq!(tab.headers[0].key, "Content-Type");
        assert_eq!(tab.headers[0].value, "application/json");
        assert!(tab.headers[0].enabled);
        assert_eq!(tab.params.len(), 1);
        assert!(tab.params[0].key.is_empty());
        assert!(tab.response.is_none());
        assert!(!tab.loading);
    }

    #[test]
    fn test_body_policy_by_method() {
        assert!(!HttpMethod::Get.sends_body());
        assert!(!HttpMethod::Delete.sends_body());
        assert!(HttpMethod::Post.sends_body());
        assert!(HttpMethod::Put.sends_body());
        assert!(HttpMethod::Patch.sends_body());
        assert!(HttpMethod::Head.sends_body());
        assert!(HttpMethod::Options.sends_body());
    }

    #[test]
    fn test_patch_leaves_unset_fields() {
        let mut tab = Tab::new("draft");
        let original_headers = tab.headers.clone();
        TabPatch {
            method: Some(HttpMethod::Post),
            url: Some("/users".into()),
            ..Default::default()
        }
        .apply_to(&mut tab);
        assert_eq!(tab.method, HttpMethod::Post);
        assert_eq!(tab.url, "/users");
        assert_eq!(tab.name, "draft");
        assert_eq!(tab.headers, original_headers);
    }
}
