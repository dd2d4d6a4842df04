//! Conduct Triage API Server
//!
//! JSON HTTP service exposing severity evaluations of workplace-conduct
//! reports, plus the option sets and rule base behind them.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use classifier::Classifier;
use serde::Serialize;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use tower_governor::GovernorLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use triage::Evaluator;

mod error;
mod rate_limit;
mod routes;
mod settings;

pub use error::{ApiError, ErrorResponse, StartupError};
pub use rate_limit::{create_governor_config, RateLimitConfig};
pub use settings::{LogSettings, ServerSettings, Settings};

/// Application state shared across handlers
///
/// Read-only after startup; every evaluation gets its own fact store.
pub struct AppState {
    pub evaluator: Evaluator,
    pub classifier: Box<dyn Classifier>,
    pub version: String,
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(evaluator: Evaluator, classifier: Box<dyn Classifier>) -> Self {
        Self {
            evaluator,
            classifier,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub rule_count: usize,
    pub classifier: &'static str,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/options", get(routes::options::get_options))
        .route("/api/v1/rules", get(routes::rules::get_rules))
        .route("/api/v1/evaluations", post(routes::evaluations::create_evaluation))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        rule_count: state.evaluator.rules().len(),
        classifier: state.classifier.name(),
    })
}

/// Initialize logging
pub fn init_logging(settings: &LogSettings) -> Result<(), StartupError> {
    let level = Level::from_str(&settings.level)
        .map_err(|_| StartupError::LogLevel(settings.level.clone()))?;

    if settings.json {
        let subscriber = FmtSubscriber::builder()
            .json()
            .with_max_level(level)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }
    Ok(())
}

/// Run the server until it fails
///
/// Rate limiting keys on the peer address, so it is applied here rather
/// than in `create_router`.
pub async fn run_server(settings: &Settings, state: Arc<AppState>) -> anyhow::Result<()> {
    let governor = create_governor_config(&settings.rate_limit)?;
    let app = create_router(state).layer(GovernorLayer { config: governor });

    info!("Starting API server on {}", settings.server.addr);

    let listener = tokio::net::TcpListener::bind(&settings.server.addr).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}
