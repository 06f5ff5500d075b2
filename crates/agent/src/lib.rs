//! Client for the compose agent running on each worker.
//!
//! The agent exposes two HTTP endpoints: `POST /up` (write the bundle to
//! disk and bring it up) and `POST /down` (tear it down). This crate
//! speaks that wire contract and classifies the outcome; it never
//! retries. Retry policy belongs to the orchestrator, which alone knows
//! whether re-issuing a directive is safe given ledger state.
//!
//! [`ComposeAgent`] is the seam between the orchestrator and the
//! transport: the HTTP client here is the production implementation, and
//! tests substitute scripted implementations.

mod client;

pub use client::{AgentConfig, HttpAgentClient};

/// Outcome classification for a single agent directive.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// The agent could not be contacted: connection failure, DNS, or
    /// timeout. Nothing is known about whether the directive arrived.
    #[error("Agent unreachable: {0}")]
    Unreachable(String),

    /// The agent answered with a non-2xx status: it received the
    /// directive and explicitly declined it.
    #[error("Agent rejected the directive ({status}): {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Raw response body for the operator.
        body: String,
    },
}

/// A directive transport to a single worker's compose agent.
#[async_trait::async_trait]
pub trait ComposeAgent: Send + Sync {
    /// Ask the agent at `location` to bring up the bundle `name` with the
    /// given compose `file` content.
    async fn up(&self, location: &str, name: &str, file: &str) -> Result<(), AgentError>;

    /// Ask the agent at `location` to tear down the bundle `name`.
    async fn down(&self, location: &str, name: &str) -> Result<(), AgentError>;
}
