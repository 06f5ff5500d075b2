//! HTTP implementation of the compose-agent wire contract.

use std::time::Duration;

use crate::{AgentError, ComposeAgent};

/// Default agent port. Workers run the compose agent on 5002.
pub const DEFAULT_AGENT_PORT: u16 = 5002;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for worker agents.
///
/// Threaded into [`HttpAgentClient::new`]; never process-global.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Port every worker agent listens on.
    pub port: u16,
    /// Bound on each directive round-trip. A timeout is reported as
    /// [`AgentError::Unreachable`], so one dead worker cannot stall the
    /// orchestrator indefinitely.
    pub request_timeout: Duration,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_AGENT_PORT,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// HTTP client for worker compose agents.
///
/// One client serves the whole fleet; the target worker is chosen per
/// call via `location`.
pub struct HttpAgentClient {
    client: reqwest::Client,
    port: u16,
}

impl HttpAgentClient {
    /// Build a client with the given agent settings.
    ///
    /// Panics if the underlying TLS backend cannot be initialised, which
    /// is a startup-time misconfiguration.
    pub fn new(config: &AgentConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .expect("Failed to build HTTP client");
        Self {
            client,
            port: config.port,
        }
    }

    /// Endpoint URL for a directive against a worker agent.
    fn endpoint(&self, location: &str, action: &str) -> String {
        format!("http://{}:{}/{}", location, self.port, action)
    }

    /// Send a directive and classify the outcome.
    ///
    /// Transport errors (connect, DNS, timeout) map to `Unreachable`;
    /// non-2xx responses map to `Rejected` with the body preserved.
    async fn dispatch(
        &self,
        url: &str,
        payload: &serde_json::Value,
    ) -> Result<(), AgentError> {
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| AgentError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(AgentError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ComposeAgent for HttpAgentClient {
    async fn up(&self, location: &str, name: &str, file: &str) -> Result<(), AgentError> {
        let url = self.endpoint(location, "up");
        let payload = serde_json::json!({ "name": name, "file": file });

        tracing::debug!(%location, bundle = %name, "Sending up directive to agent");
        self.dispatch(&url, &payload).await
    }

    async fn down(&self, location: &str, name: &str) -> Result<(), AgentError> {
        let url = self.endpoint(location, "down");
        let payload = serde_json::json!({ "name": name });

        tracing::debug!(%location, bundle = %name, "Sending down directive to agent");
        self.dispatch(&url, &payload).await
    }
}
