//! Rule Base Routes

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;

/// One rule as shown to clients
#[derive(Debug, Serialize)]
pub struct RuleRecord {
    pub name: &'static str,
    pub salience: i32,
    pub conditions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RulesResponse {
    pub data: Vec<RuleRecord>,
    pub count: usize,
}

/// List the rule base in declaration order
pub async fn get_rules(State(state): State<Arc<AppState>>) -> Json<RulesResponse> {
    let data: Vec<_> = state
        .evaluator
        .rules()
        .rules()
        .iter()
        .map(|rule| RuleRecord {
            name: rule.name(),
            salience: rule.salience(),
            conditions: rule.conditions().iter().map(ToString::to_string).collect(),
        })
        .collect();

    Json(RulesResponse {
        count: data.len(),
        data,
    })
}
