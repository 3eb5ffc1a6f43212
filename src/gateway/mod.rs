// SPDX-License-Identifier: MIT
//! Simulated API gateway — intercepts requests under the API prefix and
//! answers them locally; everything else passes through to real transport.

pub mod backend;
pub mod handlers;
pub mod request;
pub mod response;
pub mod routes;
pub mod transport;

pub use backend::MockBackend;
pub use request::{BodyPayload, RequestConfig};
pub use response::HttpResponse;
pub use routes::Operation;
pub use transport::{ReqwestTransport, Transport};

use anyhow::{bail, Result};
use std::sync::Arc;
use tracing::debug;

/// Boundary dispatcher in front of the HTTP pipeline.
///
/// Requests whose path falls under the backend's API prefix never reach
/// the network: the backend simulates the server. All other requests go to
/// the injected transport unchanged.
pub struct Gateway {
    backend: MockBackend,
    transport: Option<Arc<dyn Transport>>,
}

impl Gateway {
    pub fn new(backend: MockBackend) -> Self {
        Self {
            backend,
            transport: None,
        }
    }

    /// Attach the passthrough transport for non-API requests.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Whether the request would be answered locally.
    pub fn intercepts(&self, req: &RequestConfig) -> bool {
        self.backend.matches(&req.path())
    }

    /// Route one request: simulate under the prefix, forward otherwise.
    pub async fn dispatch(&self, req: RequestConfig) -> Result<HttpResponse> {
        if self.intercepts(&req) {
            debug!(method = %req.method, path = %req.path(), "intercepted");
            return Ok(self.backend.handle(req).await);
        }
        match &self.transport {
            Some(transport) => transport.send(req).await,
            None => bail!(
                "no transport configured for non-API path {}",
                req.path()
            ),
        }
    }
}
