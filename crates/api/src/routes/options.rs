//! Categorical Option Routes

use axum::Json;
use serde::Serialize;
use working_memory::{all_option_sets, OptionSet, NOT_APPLICABLE};

/// Response for the options endpoint
#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    /// Code meaning "not informed", accepted by every field
    pub not_applicable: &'static str,
    pub option_sets: Vec<OptionSet>,
}

/// List every categorical option set in form order
pub async fn get_options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        not_applicable: NOT_APPLICABLE,
        option_sets: all_option_sets(),
    })
}
