use std::sync::Arc;

use crate::config::ServerConfig;
use crate::deploy::DeployOrchestrator;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: flotilla_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Launch/stop orchestration service.
    pub orchestrator: Arc<DeployOrchestrator>,
}
