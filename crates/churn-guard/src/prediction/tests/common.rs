use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::prediction::classifier::{
    ChurnClassifier, ClassProbabilities, ClassifierError, ProbabilityEstimator,
};
use crate::prediction::domain::{ChurnLabel, CustomerProfile, FeatureVector};
use crate::prediction::service::ChurnPredictionService;

pub(super) const TOLERANCE: f64 = 1e-9;

/// Always predicts the same label and reports fixed probabilities.
pub(super) struct ProbabilisticStub {
    pub(super) label: ChurnLabel,
    pub(super) churn: f64,
    pub(super) calls: AtomicUsize,
}

impl ProbabilisticStub {
    pub(super) fn new(label: ChurnLabel, churn: f64) -> Self {
        Self {
            label,
            churn,
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ChurnClassifier for ProbabilisticStub {
    fn name(&self) -> &str {
        "probabilistic-stub"
    }

    fn predict_label(&self, _features: &FeatureVector) -> Result<ChurnLabel, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.label)
    }

    fn probability_estimator(&self) -> Option<&dyn ProbabilityEstimator> {
        Some(self as &dyn ProbabilityEstimator)
    }
}

impl ProbabilityEstimator for ProbabilisticStub {
    fn predict_probabilities(
        &self,
        _features: &FeatureVector,
    ) -> Result<ClassProbabilities, ClassifierError> {
        Ok(ClassProbabilities {
            stay: 1.0 - self.churn,
            churn: self.churn,
        })
    }
}

/// Label-only classifier, like a margin model trained without probability estimates.
pub(super) struct LabelOnlyStub(pub(super) ChurnLabel);

impl ChurnClassifier for LabelOnlyStub {
    fn name(&self) -> &str {
        "label-only-stub"
    }

    fn predict_label(&self, _features: &FeatureVector) -> Result<ChurnLabel, ClassifierError> {
        Ok(self.0)
    }
}

pub(super) struct FailingLabelStub;

impl ChurnClassifier for FailingLabelStub {
    fn name(&self) -> &str {
        "failing-stub"
    }

    fn predict_label(&self, _features: &FeatureVector) -> Result<ChurnLabel, ClassifierError> {
        Err(ClassifierError("model backend offline".to_string()))
    }
}

/// Has the probability capability but the call itself fails.
pub(super) struct FailingProbabilityStub;

impl ChurnClassifier for FailingProbabilityStub {
    fn name(&self) -> &str {
        "flaky-probability-stub"
    }

    fn predict_label(&self, _features: &FeatureVector) -> Result<ChurnLabel, ClassifierError> {
        Ok(ChurnLabel::Churn)
    }

    fn probability_estimator(&self) -> Option<&dyn ProbabilityEstimator> {
        Some(self as &dyn ProbabilityEstimator)
    }
}

impl ProbabilityEstimator for FailingProbabilityStub {
    fn predict_probabilities(
        &self,
        _features: &FeatureVector,
    ) -> Result<ClassProbabilities, ClassifierError> {
        Err(ClassifierError("probability head timed out".to_string()))
    }
}

pub(super) fn profile(
    tenure_months: i64,
    monthly_charges: f64,
    paperless_billing: &str,
    contract_type: &str,
    internet_service: &str,
) -> CustomerProfile {
    CustomerProfile {
        tenure_months,
        monthly_charges,
        total_charges: monthly_charges * tenure_months.max(1) as f64,
        paperless_billing: paperless_billing.to_string(),
        contract_type: contract_type.to_string(),
        internet_service: internet_service.to_string(),
    }
}

/// Triggers every heuristic rule.
pub(super) fn high_risk_profile() -> CustomerProfile {
    profile(3, 95.5, "Yes", "Month-to-month", "Fiber optic")
}

/// Triggers no heuristic rule.
pub(super) fn loyal_profile() -> CustomerProfile {
    profile(36, 50.0, "No", "Two year", "DSL")
}

pub(super) fn churn_service(churn: f64) -> ChurnPredictionService<ProbabilisticStub> {
    ChurnPredictionService::new(Arc::new(ProbabilisticStub::new(ChurnLabel::Churn, churn)))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
