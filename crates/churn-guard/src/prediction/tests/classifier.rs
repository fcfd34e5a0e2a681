use std::sync::Arc;

use super::common::*;
use crate::prediction::classifier::{ClassifierAdapter, InferenceError};
use crate::prediction::domain::{ChurnLabel, ProbabilitySource};
use crate::prediction::features::FeatureVectorBuilder;

fn features() -> crate::prediction::domain::FeatureVector {
    FeatureVectorBuilder::default()
        .build(&high_risk_profile())
        .expect("valid profile")
}

#[test]
fn adapter_converts_probabilities_to_percentages() {
    let adapter = ClassifierAdapter::new(Arc::new(ProbabilisticStub::new(ChurnLabel::Churn, 0.823)));

    let classification = adapter.predict(&features()).expect("prediction succeeds");

    assert_eq!(classification.label, ChurnLabel::Churn);
    assert_eq!(classification.source, ProbabilitySource::Model);
    assert!((classification.churn_probability - 82.3).abs() < TOLERANCE);
    assert!((classification.stay_probability - 17.7).abs() < TOLERANCE);
    assert!(
        (classification.churn_probability + classification.stay_probability - 100.0).abs()
            < TOLERANCE
    );
}

#[test]
fn adapter_falls_back_to_degenerate_distribution() {
    for (label, churn, stay) in [(ChurnLabel::Stay, 0.0, 100.0), (ChurnLabel::Churn, 100.0, 0.0)] {
        let adapter = ClassifierAdapter::new(Arc::new(LabelOnlyStub(label)));

        let classification = adapter.predict(&features()).expect("prediction succeeds");

        assert_eq!(classification.label, label);
        assert_eq!(classification.source, ProbabilitySource::Degenerate);
        assert_eq!(classification.churn_probability, churn);
        assert_eq!(classification.stay_probability, stay);
    }
}

#[test]
fn adapter_surfaces_label_failures() {
    let adapter = ClassifierAdapter::new(Arc::new(FailingLabelStub));

    match adapter.predict(&features()) {
        Err(InferenceError::Label { model, source }) => {
            assert_eq!(model, "failing-stub");
            assert!(source.to_string().contains("offline"));
        }
        other => panic!("expected label failure, got {other:?}"),
    }
}

#[test]
fn adapter_propagates_runtime_probability_failures() {
    let adapter = ClassifierAdapter::new(Arc::new(FailingProbabilityStub));

    match adapter.predict(&features()) {
        Err(InferenceError::Probabilities { source, .. }) => {
            assert!(source.to_string().contains("timed out"));
        }
        other => panic!("expected probability failure, got {other:?}"),
    }
}

#[test]
fn adapter_rejects_probabilities_outside_unit_interval() {
    let adapter = ClassifierAdapter::new(Arc::new(ProbabilisticStub::new(ChurnLabel::Churn, 1.4)));

    assert!(matches!(
        adapter.predict(&features()),
        Err(InferenceError::InvalidProbabilities { .. })
    ));
}

#[test]
fn adapter_calls_classifier_every_time() {
    let stub = Arc::new(ProbabilisticStub::new(ChurnLabel::Stay, 0.2));
    let adapter = ClassifierAdapter::new(Arc::clone(&stub));

    adapter.predict(&features()).expect("first call");
    adapter.predict(&features()).expect("second call");

    assert_eq!(stub.calls(), 2);
}

#[test]
fn model_info_reports_capability() {
    let capable = ClassifierAdapter::new(Arc::new(ProbabilisticStub::new(ChurnLabel::Stay, 0.1)));
    let label_only = ClassifierAdapter::new(Arc::new(LabelOnlyStub(ChurnLabel::Stay)));

    assert!(capable.model_info().supports_probabilities);
    assert!(!label_only.model_info().supports_probabilities);
    assert_eq!(label_only.model_info().name, "label-only-stub");
    assert_eq!(label_only.model_info().version, "unversioned");
}
