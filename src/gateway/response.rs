// SPDX-License-Identifier: MIT
//! Simulated HTTP response envelope.

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

use super::request::RequestConfig;

/// Mirrors a standard HTTP client response object (`data`, `status`,
/// `statusText`, `headers`, `config`) so callers written against real
/// network responses work unmodified.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    pub data: Value,
    pub status: u16,
    pub status_text: String,
    pub headers: HashMap<String, String>,
    /// Echo of the request that produced this response.
    pub config: RequestConfig,
}

impl HttpResponse {
    /// Build a simulated response with server-shaped headers.
    pub fn simulated(status: u16, data: Value, config: RequestConfig) -> Self {
        let mut headers = HashMap::new();
        headers.insert("date".to_string(), Utc::now().to_rfc2822());
        headers.insert(
            "server".to_string(),
            format!("skillsim/{}", env!("CARGO_PKG_VERSION")),
        );
        if status != 204 {
            headers.insert("content-type".to_string(), "application/json".to_string());
        }
        Self {
            data,
            status,
            status_text: reason_phrase(status).to_string(),
            headers,
            config,
        }
    }
}

/// Canonical reason phrase for the status codes the simulator emits.
pub fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "",
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn simulated_response_shape() {
        let config = RequestConfig::new("GET", "/api/skills");
        let resp = HttpResponse::simulated(200, json!([]), config);
        assert_eq!(resp.status, 200);
        assert_eq!(resp.status_text, "OK");
        assert_eq!(resp.headers["content-type"], "application/json");
        assert!(resp.headers.contains_key("date"));
        assert_eq!(resp.config.url, "/api/skills");
    }

    #[test]
    fn no_content_omits_content_type() {
        let config = RequestConfig::new("DELETE", "/api/skills/x");
        let resp = HttpResponse::simulated(204, Value::Null, config);
        assert_eq!(resp.status_text, "No Content");
        assert!(!resp.headers.contains_key("content-type"));
    }

    #[test]
    fn serializes_camel_case() {
        let config = RequestConfig::new("GET", "/api/badges");
        let resp = HttpResponse::simulated(404, json!({"message": "Not Found"}), config);
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["statusText"], json!("Not Found"));
        assert_eq!(value["status"], json!(404));
        assert_eq!(value["config"]["url"], json!("/api/badges"));
    }
}
