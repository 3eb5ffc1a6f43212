// SPDX-License-Identifier: MIT
//! Response simulation — executes recognized operations against the local
//! store and answers as if a real server had.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error};

use crate::skills::SkillStore;

use super::handlers::{self, Reply};
use super::request::RequestConfig;
use super::response::HttpResponse;
use super::routes;

/// Default artificial latency applied to every simulated response.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(200);

/// Default path prefix the simulator claims.
pub const DEFAULT_API_PREFIX: &str = "/api";

/// The simulated server behind the gateway.
pub struct MockBackend {
    store: Arc<dyn SkillStore>,
    api_prefix: String,
    latency: Duration,
}

impl MockBackend {
    pub fn new(store: Arc<dyn SkillStore>) -> Self {
        Self {
            store,
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            latency: DEFAULT_LATENCY,
        }
    }

    pub fn with_api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Whether `path` falls under the API prefix gate.
    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.api_prefix)
    }

    /// Answer one request.
    ///
    /// The store read happens at the start of the unit and the write, if
    /// any, before the latency sleep — the sleep is the only suspension
    /// point after persistence, so no torn state is observable.
    pub async fn handle(&self, config: RequestConfig) -> HttpResponse {
        let path = config.path();
        let api_path = path.strip_prefix(&self.api_prefix).unwrap_or("");
        let record = config.body.to_record();
        let op = routes::interpret(&config.method, api_path, &record);
        debug!(method = %config.method, path = %path, op = ?op, "simulating request");

        let reply = match handlers::execute(op, self.store.as_ref()).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(err = %e, path = %path, "handler failed");
                Reply::internal_error()
            }
        };

        tokio::time::sleep(self.latency).await;
        HttpResponse::simulated(reply.status, reply.data, config)
    }
}
