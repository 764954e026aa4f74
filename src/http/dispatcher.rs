use std::collections::BTreeMap;
use std::time::Instant;

use reqwest::{Client, Method};

use super::builder::PreparedRequest;
use crate::error::EngineError;
use crate::state::response::{ExecutionResult, SuccessResponse};
use crate::state::tab::HttpMethod;

/// Issue one HTTP call and normalize the outcome. A completed exchange is a
/// `Success` whatever the status code (404 and 500 included); only transport
/// failures produce a `Failure`, carrying `status = 0` and the elapsed time
/// measured from `started`.
pub async fn dispatch(
    client: &Client,
    request: PreparedRequest,
    started: Instant,
) -> ExecutionResult {
    match send(client, request, started).await {
        Ok(success) => ExecutionResult::Success(success),
        Err(err) => {
            ExecutionResult::failure(EngineError::Http(err).to_string(), elapsed_ms(started))
        }
    }
}

async fn send(
    client: &Client,
    request: PreparedRequest,
    started: Instant,
) -> Result<SuccessResponse, reqwest::Error> {
    let mut builder = client.request(method_for(request.method), &request.url);

    if !request.params.is_empty() {
        builder = builder.query(&request.params);
    }
    for (key, value) in &request.headers {
        builder = builder.header(key, value);
    }
    if let Some(body) = &request.body {
        builder = builder.json(body);
    }

    let response = builder.send().await?;

    let status = response.status();
    let status_text = status.canonical_reason().unwrap_or("Unknown").to_string();
    let headers: BTreeMap<String, String> = response
        .headers()
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
        .collect();

    let bytes = response.bytes().await?;
    let time_ms = elapsed_ms(started);

    let data = decode_payload(&bytes);
    let size_bytes = serde_json::to_string(&data)
        .map(|s| s.len())
        .unwrap_or(bytes.len());

    Ok(SuccessResponse {
        status: status.as_u16(),
        status_text,
        headers,
        data,
        time_ms,
        size_bytes,
    })
}

fn method_for(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Head => Method::HEAD,
        HttpMethod::Options => Method::OPTIONS,
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

/// Response payloads parse as JSON when they can, fall back to the raw text
/// as a JSON string, and an empty payload is `null`.
fn decode_payload(bytes: &[u8]) -> serde_json::Value {
    if bytes.is_empty() {
        return serde_json::Value::Null;
    }
    match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(_) => serde_json::Value::String(String::from_utf8_lossy(bytes).into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_payload_json() {
        assert_eq!(decode_payload(br#"{"ok":true}"#), json!({"ok": true}));
    }

    #[test]
    fn test_decode_payload_text_falls_back_to_string() {
        assert_eq!(decode_payload(b"<html></html>"), json!("<html></html>"));
    }

    #[test]
    fn test_decode_payload_empty_is_null() {
        assert_eq!(decode_payload(b""), serde_json::Value::Null);
    }
}
