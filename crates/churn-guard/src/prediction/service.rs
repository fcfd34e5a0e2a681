use std::sync::Arc;

use super::actions::recommended_actions;
use super::classifier::{ChurnClassifier, ClassifierAdapter, InferenceError, ModelInfo};
use super::domain::{CustomerProfile, PredictionResult};
use super::features::{FeatureVectorBuilder, ValidationError};
use super::risk::{RiskAssessment, RiskScorer};

/// Service composing the feature builder, classifier adapter, and heuristic scorer.
pub struct ChurnPredictionService<C: ?Sized> {
    builder: FeatureVectorBuilder,
    adapter: ClassifierAdapter<C>,
    scorer: RiskScorer,
}

impl<C> ChurnPredictionService<C>
where
    C: ChurnClassifier + ?Sized,
{
    pub fn new(classifier: Arc<C>) -> Self {
        Self::with_parts(
            FeatureVectorBuilder::default(),
            classifier,
            RiskScorer::default(),
        )
    }

    pub fn with_parts(
        builder: FeatureVectorBuilder,
        classifier: Arc<C>,
        scorer: RiskScorer,
    ) -> Self {
        Self {
            builder,
            adapter: ClassifierAdapter::new(classifier),
            scorer,
        }
    }

    pub fn model_info(&self) -> ModelInfo {
        self.adapter.model_info()
    }

    /// Heuristic assessment on its own, for live indicators before a prediction is requested.
    pub fn assess_risk(&self, profile: &CustomerProfile) -> RiskAssessment {
        self.scorer.score(profile)
    }

    /// Run one prediction. Either every stage succeeds or the first error is returned.
    pub fn evaluate(&self, profile: &CustomerProfile) -> Result<PredictionResult, PredictionError> {
        let features = self.builder.build(profile)?;
        let classification = self.adapter.predict(&features)?;
        let risk_assessment = self.scorer.score(profile);

        tracing::debug!(
            label = %classification.label,
            churn_probability = classification.churn_probability,
            risk_score = risk_assessment.score,
            "churn prediction evaluated"
        );

        Ok(PredictionResult {
            label: classification.label,
            churn_probability: classification.churn_probability,
            stay_probability: classification.stay_probability,
            probability_source: classification.source,
            risk_assessment,
            recommended_actions: recommended_actions(classification.label)
                .iter()
                .map(|action| action.to_string())
                .collect(),
        })
    }
}

/// Error raised by the prediction service.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Inference(#[from] InferenceError),
}
