use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EnvVariable {
    pub key: String,
    pub value: String,
}

impl EnvVariable {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Named set of template-variable substitutions. Exactly one environment is
/// active at a time (tracked by the workspace).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub id: String,
    pub name: String,
    pub variables: Vec<EnvVariable>,
}

impl Environment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            variables: Vec::new(),
        }
    }

    /// Variable rows as a lookup map. Key-less rows are skipped; when a key
    /// repeats, the later row wins.
    pub fn variable_map(&self) -> HashMap<String, String> {
        self.variables
            .iter()
            .filter(|v| !v.key.is_empty())
            .map(|v| (v.key.clone(), v.value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_map_skips_blank_keys_and_dedupes() {
        let mut env = Environment::new("Development");
        env.variables = vec![
            EnvVariable::new("host", "old.example.com"),
            EnvVariable::new("", "ignored"),
            EnvVariable::new("host", "api.example.com"),
        ];
        let map = env.variable_map();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("host").map(String::as_str), Some("api.example.com"));
    }
}
