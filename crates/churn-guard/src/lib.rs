//! Churn prediction and explainable risk scoring for telecom subscribers.
//!
//! The [`prediction`] module holds the decision logic: profile validation, the heuristic
//! risk table, the classifier contract and the orchestrating service. Configuration,
//! telemetry and process-level errors live alongside it for the binaries in `services/`.

pub mod config;
pub mod error;
pub mod prediction;
pub mod telemetry;
