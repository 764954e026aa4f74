use std::collections::HashMap;

use serde_json::Value;

use crate::env::interpolator::substitute;
use crate::error::EngineError;
use crate::state::tab::{HttpMethod, KeyValuePair, Tab};

/// A fully resolved request, ready for dispatch: variables substituted, base
/// URL joined, disabled rows dropped, body parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub params: Vec<(String, String)>,
    pub body: Option<Value>,
}

/// Turn a tab draft into a `PreparedRequest` against the active environment's
/// variables. The only failure mode is a malformed JSON body on a method that
/// sends one.
pub fn prepare(
    tab: &Tab,
    base_url: &str,
    vars: &HashMap<String, String>,
) -> Result<PreparedRequest, EngineError> {
    let url = substitute(&tab.url, vars);
    // Plain concatenation; whether the result is a valid absolute URL is the
    // caller's responsibility.
    let url = if base_url.is_empty() {
        url
    } else {
        format!("{base_url}{url}")
    };

    let body = if tab.method.sends_body() {
        Some(parse_body(&substitute(&tab.body, vars))?)
    } else {
        None
    };

    Ok(PreparedRequest {
        method: tab.method,
        url,
        headers: collect_enabled(&tab.headers),
        params: collect_enabled(&tab.params),
        body,
    })
}

/// A blank body stands for an empty JSON object.
fn parse_body(text: &str) -> Result<Value, EngineError> {
    if text.trim().is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    Ok(serde_json::from_str(text)?)
}

/// Drop disabled and key-less rows; collapse duplicate keys in list order,
/// last value wins.
fn collect_enabled(rows: &[KeyValuePair]) -> Vec<(String, String)> {
    let mut out: Vec<(String, String)> = Vec::new();
    for row in rows {
        if !row.enabled || row.key.is_empty() {
            continue;
        }
        match out.iter_mut().find(|(key, _)| *key == row.key) {
            Some(existing) => existing.1 = row.value.clone(),
            None => out.push((row.key.clone(), row.value.clone())),
        }
    }
    out
}
