//! Saved-response data model for request chaining.
//!
//! A [`SavedResponse`] is the snapshot of a completed request's response kept
//! in the chain store under the request's `@name`, so that later requests can
//! reference it through `{{name.response...}}` placeholders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// A named response snapshot available to chain-variable resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedResponse {
    /// Name this response is stored under (the originating request's `@name`).
    pub name: String,

    /// HTTP status code (e.g., 200, 404).
    pub status: u16,

    /// Response headers as key-value pairs.
    pub headers: HashMap<String, String>,

    /// Response body, parsed as JSON when the raw body is valid JSON.
    ///
    /// Non-JSON bodies are kept as `JsonValue::String` so path navigation
    /// over them simply yields "not found" instead of failing.
    pub body: JsonValue,

    /// The raw response body exactly as received.
    pub raw_body: String,

    /// When the response was saved.
    pub timestamp: DateTime<Utc>,
}

impl SavedResponse {
    /// Builds a SavedResponse from the raw pieces of a completed response.
    ///
    /// The raw body is parsed as JSON when possible; otherwise it is stored
    /// as a plain string value.
    ///
    /// # Arguments
    ///
    /// * `name` - Name to store the response under
    /// * `status` - HTTP status code
    /// * `headers` - Response headers
    /// * `raw_body` - Response body text
    pub fn from_raw(
        name: impl Into<String>,
        status: u16,
        headers: HashMap<String, String>,
        raw_body: impl Into<String>,
    ) -> Self {
        let raw_body = raw_body.into();
        let body = serde_json::from_str(&raw_body)
            .unwrap_or_else(|_| JsonValue::String(raw_body.clone()));

        Self {
            name: name.into(),
            status,
            headers,
            body,
            raw_body,
            timestamp: Utc::now(),
        }
    }

    /// Gets a response header value (case-insensitive lookup).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
