// SPDX-License-Identifier: MIT
//! Real-network passthrough for requests outside the API prefix.

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

use super::request::{BodyPayload, RequestConfig};
use super::response::HttpResponse;

/// The real transport side of the gateway. Implementations perform the
/// actual network call for requests the simulator does not claim.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, req: RequestConfig) -> Result<HttpResponse>;
}

/// `reqwest`-backed transport.
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    /// `base_url` is prepended to path-only request urls, e.g.
    /// `"https://example.com"`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, req: RequestConfig) -> Result<HttpResponse> {
        let method = reqwest::Method::from_bytes(req.method.to_ascii_uppercase().as_bytes())
            .with_context(|| format!("invalid HTTP method {:?}", req.method))?;
        let url = if req.url.contains("://") {
            req.url.clone()
        } else {
            format!("{}{}", self.base_url.trim_end_matches('/'), req.url)
        };

        let mut builder = self.client.request(method, &url);
        for (name, value) in &req.headers {
            builder = builder.header(name, value);
        }
        builder = match &req.body {
            BodyPayload::Empty => builder,
            BodyPayload::Text(raw) => builder.body(raw.clone()),
            BodyPayload::Form(pairs) => builder.form(pairs),
            BodyPayload::Json(value) => builder.json(value),
        };

        let resp = builder
            .send()
            .await
            .with_context(|| format!("passthrough request to {url} failed"))?;
        let status = resp.status();
        let headers: HashMap<String, String> = resp
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect();
        let raw = resp.text().await.unwrap_or_default();
        let data = serde_json::from_str::<Value>(&raw).unwrap_or(Value::String(raw));

        Ok(HttpResponse {
            data,
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            headers,
            config: req,
        })
    }
}
