//! Route Handlers

pub mod evaluations;
pub mod options;
pub mod rules;
