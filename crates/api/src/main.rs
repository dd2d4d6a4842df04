//! Conduct Triage Service - Main Entry Point

use anyhow::Context;
use api::{init_logging, run_server, AppState, Settings};
use classifier::KeywordClassifier;
use std::sync::Arc;
use tracing::info;
use triage::Evaluator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load configuration")?;
    init_logging(&settings.log)?;

    info!("=== Conduct Triage v{} ===", env!("CARGO_PKG_VERSION"));

    let evaluator = Evaluator::with_config(settings.engine).context("failed to build rule base")?;
    info!(
        "Rule base ready: {} rules, firing limit {}",
        evaluator.rules().len(),
        settings.engine.firing_limit(evaluator.rules().len())
    );

    let state = Arc::new(AppState::new(evaluator, Box::new(KeywordClassifier::default())));
    run_server(&settings, state).await
}
