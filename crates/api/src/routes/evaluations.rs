//! Evaluation Routes

use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::debug;
use triage::{EvaluationInput, EvaluationReport};

use crate::error::ApiError;
use crate::AppState;

/// Evaluate one conduct report
///
/// The engine is synchronous, so the session runs on the blocking pool.
pub async fn create_evaluation(
    State(state): State<Arc<AppState>>,
    Json(input): Json<EvaluationInput>,
) -> Result<Json<EvaluationReport>, ApiError> {
    debug!("Evaluation requested ({} chars)", input.description.len());

    let report = tokio::task::spawn_blocking(move || {
        state.evaluator.evaluate(&input, state.classifier.as_ref())
    })
    .await??;

    Ok(Json(report))
}
