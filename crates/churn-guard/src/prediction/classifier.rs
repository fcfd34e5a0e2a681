use std::sync::Arc;

use serde::Serialize;

use super::domain::{ChurnLabel, FeatureVector, ProbabilitySource};

/// Failure reported by a concrete classifier implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ClassifierError(pub String);

/// Class probabilities as fractions in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassProbabilities {
    pub stay: f64,
    pub churn: f64,
}

/// Identification of the loaded model, exposed to operators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    pub name: String,
    pub version: String,
    pub supports_probabilities: bool,
}

/// Black-box binary classifier.
///
/// Label prediction is mandatory. Probability estimation is an optional capability
/// discovered through [`ChurnClassifier::probability_estimator`].
pub trait ChurnClassifier: Send + Sync {
    fn name(&self) -> &str;

    fn version(&self) -> &str {
        "unversioned"
    }

    fn predict_label(&self, features: &FeatureVector) -> Result<ChurnLabel, ClassifierError>;

    fn probability_estimator(&self) -> Option<&dyn ProbabilityEstimator> {
        None
    }
}

/// Capability implemented by classifiers able to estimate class probabilities.
pub trait ProbabilityEstimator: Send + Sync {
    fn predict_probabilities(
        &self,
        features: &FeatureVector,
    ) -> Result<ClassProbabilities, ClassifierError>;
}

/// Errors that abort a prediction at the classifier boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InferenceError {
    #[error("classifier '{model}' failed to produce a label: {source}")]
    Label {
        model: String,
        source: ClassifierError,
    },
    #[error("classifier '{model}' failed to estimate probabilities: {source}")]
    Probabilities {
        model: String,
        source: ClassifierError,
    },
    #[error("classifier '{model}' returned unusable probabilities (stay {stay}, churn {churn})")]
    InvalidProbabilities { model: String, stay: f64, churn: f64 },
}

/// Classifier output normalised to percentages summing to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub label: ChurnLabel,
    pub churn_probability: f64,
    pub stay_probability: f64,
    pub source: ProbabilitySource,
}

const PROBABILITY_SUM_TOLERANCE: f64 = 1e-6;

/// Uniform predict/probability contract over any [`ChurnClassifier`].
///
/// Every call reaches the classifier; nothing is cached between requests.
pub struct ClassifierAdapter<C: ?Sized> {
    classifier: Arc<C>,
}

impl<C: ?Sized> Clone for ClassifierAdapter<C> {
    fn clone(&self) -> Self {
        Self {
            classifier: Arc::clone(&self.classifier),
        }
    }
}

impl<C> ClassifierAdapter<C>
where
    C: ChurnClassifier + ?Sized,
{
    pub fn new(classifier: Arc<C>) -> Self {
        Self { classifier }
    }

    pub fn model_info(&self) -> ModelInfo {
        ModelInfo {
            name: self.classifier.name().to_string(),
            version: self.classifier.version().to_string(),
            supports_probabilities: self.classifier.probability_estimator().is_some(),
        }
    }

    pub fn predict(&self, features: &FeatureVector) -> Result<Classification, InferenceError> {
        let label = self
            .classifier
            .predict_label(features)
            .map_err(|source| InferenceError::Label {
                model: self.classifier.name().to_string(),
                source,
            })?;

        let Some(estimator) = self.classifier.probability_estimator() else {
            tracing::debug!(
                model = self.classifier.name(),
                %label,
                "classifier has no probability support, reporting degenerate distribution"
            );
            return Ok(degenerate(label));
        };

        let probabilities = estimator
            .predict_probabilities(features)
            .map_err(|source| InferenceError::Probabilities {
                model: self.classifier.name().to_string(),
                source,
            })?;
        self.check(probabilities)?;

        let churn_probability = probabilities.churn * 100.0;
        Ok(Classification {
            label,
            churn_probability,
            stay_probability: 100.0 - churn_probability,
            source: ProbabilitySource::Model,
        })
    }

    fn check(&self, probabilities: ClassProbabilities) -> Result<(), InferenceError> {
        let ClassProbabilities { stay, churn } = probabilities;
        let in_unit = |value: f64| value.is_finite() && (0.0..=1.0).contains(&value);

        let sums_to_one = ((stay + churn) - 1.0).abs() <= PROBABILITY_SUM_TOLERANCE;

        if in_unit(stay) && in_unit(churn) && sums_to_one {
            return Ok(());
        }

        Err(InferenceError::InvalidProbabilities {
            model: self.classifier.name().to_string(),
            stay,
            churn,
        })
    }
}

fn degenerate(label: ChurnLabel) -> Classification {
    let churn_probability = match label {
        ChurnLabel::Churn => 100.0,
        ChurnLabel::Stay => 0.0,
    };

    Classification {
        label,
        churn_probability,
        stay_probability: 100.0 - churn_probability,
        source: ProbabilitySource::Degenerate,
    }
}
