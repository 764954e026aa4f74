use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Normalized outcome of one request execution. Completed HTTP exchanges are
/// always `Success`, whatever the status code; `Failure` covers transport
/// problems and client-side body-parse errors only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ExecutionResult {
    Success(SuccessResponse),
    Failure(FailureResponse),
}

impl ExecutionResult {
    pub fn failure(error: impl Into<String>, time_ms: u64) -> Self {
        ExecutionResult::Failure(FailureResponse {
            error: error.into(),
            time_ms,
            status: 0,
            status_text: String::from("Error"),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionResult::Success(_))
    }

    pub fn status(&self) -> u16 {
        match self {
            ExecutionResult::Success(s) => s.status,
            ExecutionResult::Failure(f) => f.status,
        }
    }

    pub fn status_text(&self) -> &str {
        match self {
            ExecutionResult::Success(s) => &s.status_text,
            ExecutionResult::Failure(f) => &f.status_text,
        }
    }

    pub fn time_ms(&self) -> u64 {
        match self {
            ExecutionResult::Success(s) => s.time_ms,
            ExecutionResult::Failure(f) => f.time_ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: BTreeMap<String, String>,
    /// Response payload: parsed JSON when the body is JSON, otherwise the raw
    /// text as a JSON string, `null` for an empty body.
    pub data: serde_json::Value,
    pub time_ms: u64,
    /// Serialized byte length of `data`.
    pub size_bytes: usize,
}

impl SuccessResponse {
    /// Pretty-printed payload for the UI's clipboard/file export path.
    pub fn pretty_data(&self) -> String {
        serde_json::to_string_pretty(&self.data).unwrap_or_else(|_| self.data.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureResponse {
    pub error: String,
    pub time_ms: u64,
    /// Always 0: failures never carry an HTTP status.
    pub status: u16,
    /// Always "Error", so the inspection surface renders failures uniformly.
    pub status_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_constructor_shape() {
        let result = ExecutionResult::failure("connection refused", 42);
        assert!(!result.is_success());
        assert_eq!(result.status(), 0);
        assert_eq!(result.status_text(), "Error");
        assert_eq!(result.time_ms(), 42);
    }

    #[test]
    fn test_result_round_trips_through_json() {
        let success = ExecutionResult::Success(SuccessResponse {
            status: 201,
            status_text: "Created".into(),
            headers: BTreeMap::from([("content-type".to_string(), "application/json".to_string())]),
            data: json!({"id": 7}),
            time_ms: 12,
            size_bytes: 8,
        });
        let text = serde_json::to_string(&success).unwrap();
        let back: ExecutionResult = serde_json::from_str(&text).unwrap();
        assert_eq!(back, success);

        let failure = ExecutionResult::failure("dns error", 3);
        let text = serde_json::to_string(&failure).unwrap();
        let back: ExecutionResult = serde_json::from_str(&text).unwrap();
        assert_eq!(back, failure);
    }

    #[test]
    fn test_pretty_data_is_indented() {
        let success = SuccessResponse {
            status: 200,
            status_text: "OK".into(),
            headers: BTreeMap::new(),
            data: json!({"a": 1}),
            time_ms: 1,
            size_bytes: 7,
        };
        assert_eq!(success.pretty_data(), "{\n  \"a\": 1\n}");
    }
}
