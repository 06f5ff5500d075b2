//! Shared test harness: router construction mirroring `main.rs`, request
//! helpers, and a scripted [`ComposeAgent`] stub.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use flotilla_agent::{AgentError, ComposeAgent};
use flotilla_api::config::ServerConfig;
use flotilla_api::deploy::DeployOrchestrator;
use flotilla_api::routes;
use flotilla_api::state::AppState;

// ---------------------------------------------------------------------------
// Scripted agent stub
// ---------------------------------------------------------------------------

/// One planned outcome for the next agent directive.
#[derive(Debug, Clone, Copy)]
pub enum StubOutcome {
    Ack,
    Unreachable,
    Rejected,
}

/// A recorded directive, for asserting what reached the agent.
#[derive(Debug, Clone)]
pub struct AgentCall {
    pub directive: &'static str,
    pub location: String,
    pub name: String,
    pub file: Option<String>,
}

/// A [`ComposeAgent`] that replays scripted outcomes and records calls.
///
/// Outcomes are consumed front-to-back; once the script is exhausted,
/// every further directive is acknowledged.
pub struct StubAgent {
    outcomes: Mutex<VecDeque<StubOutcome>>,
    calls: Mutex<Vec<AgentCall>>,
}

impl StubAgent {
    /// An agent that acknowledges everything.
    pub fn acking() -> Arc<Self> {
        Self::scripted([])
    }

    /// An agent that replays the given outcomes in order.
    pub fn scripted(outcomes: impl IntoIterator<Item = StubOutcome>) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// All directives received so far.
    pub fn calls(&self) -> Vec<AgentCall> {
        self.calls.lock().unwrap().clone()
    }

    fn next_outcome(&self) -> Result<(), AgentError> {
        let outcome = self
            .outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(StubOutcome::Ack);
        match outcome {
            StubOutcome::Ack => Ok(()),
            StubOutcome::Unreachable => {
                Err(AgentError::Unreachable("connection refused".to_string()))
            }
            StubOutcome::Rejected => Err(AgentError::Rejected {
                status: 500,
                body: "Could not call docker compose".to_string(),
            }),
        }
    }
}

#[async_trait::async_trait]
impl ComposeAgent for StubAgent {
    async fn up(&self, location: &str, name: &str, file: &str) -> Result<(), AgentError> {
        self.calls.lock().unwrap().push(AgentCall {
            directive: "up",
            location: location.to_string(),
            name: name.to_string(),
            file: Some(file.to_string()),
        });
        self.next_outcome()
    }

    async fn down(&self, location: &str, name: &str) -> Result<(), AgentError> {
        self.calls.lock().unwrap().push(AgentCall {
            directive: "down",
            location: location.to_string(),
            name: name.to_string(),
            file: None,
        });
        self.next_outcome()
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        agent_port: 5002,
        agent_timeout_secs: 10,
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool and agent transport.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool, agent: Arc<dyn ComposeAgent>) -> Router {
    let config = test_config();
    let orchestrator = Arc::new(DeployOrchestrator::new(pool.clone(), agent));

    let state = AppState {
        pool,
        config: Arc::new(config),
        orchestrator,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request.
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a DELETE request.
pub async fn delete(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Register a script via the API and return its ID.
pub async fn create_script(
    pool: &PgPool,
    agent: Arc<dyn ComposeAgent>,
    name: &str,
    content: &str,
) -> i64 {
    let app = build_test_app(pool.clone(), agent);
    let body = serde_json::json!({ "name": name, "content": content });
    let response = post_json(app, "/api/v1/scripts", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"]
        .as_i64()
        .expect("script id")
}

/// Register a worker via the API and return its ID.
pub async fn create_worker(
    pool: &PgPool,
    agent: Arc<dyn ComposeAgent>,
    name: &str,
    location: &str,
) -> i64 {
    let app = build_test_app(pool.clone(), agent);
    let body = serde_json::json!({ "name": name, "location": location });
    let response = post_json(app, "/api/v1/workers", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"]
        .as_i64()
        .expect("worker id")
}
