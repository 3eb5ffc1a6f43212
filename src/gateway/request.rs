// SPDX-License-Identifier: MIT
//! Request descriptor and body normalization.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

// ─── Request descriptor ───────────────────────────────────────────────────────

/// An outgoing request as the HTTP client pipeline sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestConfig {
    /// HTTP method, upper- or lowercase.
    pub method: String,

    /// Full URL or absolute path, e.g. `"/api/skills/123?verbose=1"`.
    pub url: String,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,

    #[serde(default, skip_serializing_if = "BodyPayload::is_empty")]
    pub body: BodyPayload,
}

impl RequestConfig {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: HashMap::new(),
            body: BodyPayload::Empty,
        }
    }

    pub fn with_body(mut self, body: BodyPayload) -> Self {
        self.body = body;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// The path component of the url: `scheme://host` and any query string
    /// or fragment stripped.
    pub fn path(&self) -> String {
        let after_host = match self.url.find("://") {
            Some(i) => {
                let rest = &self.url[i + 3..];
                match rest.find('/') {
                    Some(j) => &rest[j..],
                    None => "/",
                }
            }
            None => self.url.as_str(),
        };
        after_host
            .split(['?', '#'])
            .next()
            .unwrap_or(after_host)
            .to_string()
    }
}

// ─── Body payloads ────────────────────────────────────────────────────────────

/// The concrete shapes a request body arrives in.
///
/// Untagged on the wire: `null` is `Empty`, a plain JSON string is `Text`,
/// an array of pairs is `Form`, any other JSON value is `Json`. Variant
/// order is load-bearing for deserialization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BodyPayload {
    /// No body.
    #[default]
    Empty,

    /// Raw textual body; JSON parse is attempted at normalization.
    Text(String),

    /// Form key/value pairs (multipart or urlencoded, already split).
    Form(Vec<(String, String)>),

    /// A value that is already structured.
    Json(Value),
}

impl BodyPayload {
    pub fn is_empty(&self) -> bool {
        matches!(self, BodyPayload::Empty)
    }

    /// Normalize into a flat record.
    ///
    /// Decoding policy, one branch per concrete shape: textual bodies get a
    /// JSON parse attempt falling back to an empty record, form pairs are
    /// flattened into string values, structured values are used as-is when
    /// they are objects.
    pub fn to_record(&self) -> Map<String, Value> {
        match self {
            BodyPayload::Empty => Map::new(),
            BodyPayload::Text(raw) => match serde_json::from_str::<Value>(raw) {
                Ok(Value::Object(map)) => map,
                _ => Map::new(),
            },
            BodyPayload::Form(pairs) => pairs
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect(),
            BodyPayload::Json(value) => value.as_object().cloned().unwrap_or_default(),
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
