//! Churn prediction pipeline: profile validation, classification, and heuristic risk.
//!
//! Raw profiles flow through [`FeatureVectorBuilder`] into a [`ClassifierAdapter`], while
//! [`RiskScorer`] scores the same profile independently. [`ChurnPredictionService`]
//! combines both into a single [`PredictionResult`].

pub mod actions;
pub mod classifier;
pub mod domain;
pub mod features;
pub mod import;
pub mod model;
pub mod risk;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use actions::{recommended_actions, CHURN_ACTIONS, STAY_ACTIONS};
pub use classifier::{
    ChurnClassifier, ClassProbabilities, Classification, ClassifierAdapter, ClassifierError,
    InferenceError, ModelInfo, ProbabilityEstimator,
};
pub use domain::{
    ChurnLabel, ContractType, CustomerProfile, FeatureVector, InternetService, PaperlessBilling,
    PredictionResult, ProbabilitySource,
};
pub use features::{FeatureVectorBuilder, FieldLimits, ValidationError};
pub use import::{ImportedProfile, ImportedRow, ProfileImportError, ProfileImporter};
pub use model::{LinearChurnModel, ModelDescriptor, ModelLoadError};
pub use risk::{RiskAssessment, RiskLevel, RiskRule, RiskScorer, STANDARD_RULES};
pub use router::prediction_router;
pub use service::{ChurnPredictionService, PredictionError};
