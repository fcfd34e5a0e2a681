//! Bundled reference classifier.
//!
//! A logistic scorer over the six profile features, described by a small JSON document.
//! Categorical features are one-hot encoded internally; categories missing from the
//! descriptor contribute nothing.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::classifier::{
    ChurnClassifier, ClassProbabilities, ClassifierError, ProbabilityEstimator,
};
use super::domain::{ChurnLabel, FeatureVector};

#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("failed to read model descriptor: {0}")]
    Io(#[from] std::io::Error),
    #[error("model descriptor is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("model descriptor rejected: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelDescriptor {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// When false the classifier only predicts labels.
    #[serde(default = "default_probability")]
    pub probability: bool,
    pub intercept: f64,
    #[serde(default)]
    pub numeric: BTreeMap<String, f64>,
    #[serde(default)]
    pub categorical: BTreeMap<String, BTreeMap<String, f64>>,
}

fn default_version() -> String {
    "1".to_string()
}

fn default_threshold() -> f64 {
    0.5
}

fn default_probability() -> bool {
    true
}

const NUMERIC_COLUMNS: [&str; 3] = ["tenure", "MonthlyCharges", "TotalCharges"];
const CATEGORICAL_COLUMNS: [&str; 3] = ["PaperlessBilling", "Contract", "InternetService"];

impl ModelDescriptor {
    fn validate(&self) -> Result<(), ModelLoadError> {
        if self.name.trim().is_empty() {
            return Err(ModelLoadError::Invalid("name must not be empty".to_string()));
        }

        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(ModelLoadError::Invalid(format!(
                "threshold {} must lie strictly between 0 and 1",
                self.threshold
            )));
        }

        if !self.intercept.is_finite() {
            return Err(ModelLoadError::Invalid("intercept must be finite".to_string()));
        }

        for (column, weight) in &self.numeric {
            if !NUMERIC_COLUMNS.contains(&column.as_str()) {
                return Err(ModelLoadError::Invalid(format!(
                    "unknown numeric column '{column}'"
                )));
            }
            if !weight.is_finite() {
                return Err(ModelLoadError::Invalid(format!(
                    "weight for '{column}' must be finite"
                )));
            }
        }

        for (column, levels) in &self.categorical {
            if !CATEGORICAL_COLUMNS.contains(&column.as_str()) {
                return Err(ModelLoadError::Invalid(format!(
                    "unknown categorical column '{column}'"
                )));
            }
            if let Some((level, _)) = levels.iter().find(|(_, weight)| !weight.is_finite()) {
                return Err(ModelLoadError::Invalid(format!(
                    "weight for '{column}={level}' must be finite"
                )));
            }
        }

        Ok(())
    }
}

/// Logistic classifier loaded once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct LinearChurnModel {
    descriptor: ModelDescriptor,
}

impl LinearChurnModel {
    pub fn from_descriptor(descriptor: ModelDescriptor) -> Result<Self, ModelLoadError> {
        descriptor.validate()?;
        Ok(Self { descriptor })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ModelLoadError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let model = Self::from_reader(file)?;
        tracing::info!(
            path = %path.display(),
            model = %model.descriptor.name,
            version = %model.descriptor.version,
            probability = model.descriptor.probability,
            "loaded churn model"
        );
        Ok(model)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ModelLoadError> {
        let descriptor: ModelDescriptor = serde_json::from_reader(reader)?;
        Self::from_descriptor(descriptor)
    }

    pub fn descriptor(&self) -> &ModelDescriptor {
        &self.descriptor
    }

    fn logit(&self, features: &FeatureVector) -> f64 {
        let numeric: f64 = features
            .numeric()
            .iter()
            .map(|(column, value)| self.descriptor.numeric.get(*column).unwrap_or(&0.0) * value)
            .sum();

        let categorical: f64 = features
            .categorical()
            .iter()
            .filter_map(|(column, level)| {
                self.descriptor
                    .categorical
                    .get(*column)
                    .and_then(|levels| levels.get(*level))
            })
            .sum();

        self.descriptor.intercept + numeric + categorical
    }

    fn churn_fraction(&self, features: &FeatureVector) -> f64 {
        1.0 / (1.0 + (-self.logit(features)).exp())
    }
}

impl ChurnClassifier for LinearChurnModel {
    fn name(&self) -> &str {
        &self.descriptor.name
    }

    fn version(&self) -> &str {
        &self.descriptor.version
    }

    fn predict_label(&self, features: &FeatureVector) -> Result<ChurnLabel, ClassifierError> {
        let churn = self.churn_fraction(features);
        if !churn.is_finite() {
            return Err(ClassifierError(format!(
                "logit is not finite for {features:?}"
            )));
        }

        Ok(if churn >= self.descriptor.threshold {
            ChurnLabel::Churn
        } else {
            ChurnLabel::Stay
        })
    }

    fn probability_estimator(&self) -> Option<&dyn ProbabilityEstimator> {
        if self.descriptor.probability {
            Some(self as &dyn ProbabilityEstimator)
        } else {
            None
        }
    }
}

impl ProbabilityEstimator for LinearChurnModel {
    fn predict_probabilities(
        &self,
        features: &FeatureVector,
    ) -> Result<ClassProbabilities, ClassifierError> {
        let churn = self.churn_fraction(features);
        if !churn.is_finite() {
            return Err(ClassifierError(format!(
                "probability is not finite for {features:?}"
            )));
        }

        Ok(ClassProbabilities {
            stay: 1.0 - churn,
            churn,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::domain::{ContractType, InternetService, PaperlessBilling};

    const DESCRIPTOR: &str = r#"{
        "name": "telco-logit",
        "version": "2024.1",
        "intercept": -0.5,
        "numeric": { "tenure": -0.05, "MonthlyCharges": 0.01 },
        "categorical": {
            "Contract": { "Month-to-month": 1.0, "Two year": -1.5 },
            "InternetService": { "Fiber optic": 0.5 }
        }
    }"#;

    fn features(contract: ContractType, tenure: u8) -> FeatureVector {
        FeatureVector {
            tenure,
            monthly_charges: 80.0,
            total_charges: 400.0,
            paperless_billing: PaperlessBilling::Yes,
            contract,
            internet_service: InternetService::FiberOptic,
        }
    }

    #[test]
    fn descriptor_defaults_enable_probabilities() {
        let model = LinearChurnModel::from_reader(DESCRIPTOR.as_bytes()).expect("model loads");
        assert_eq!(model.descriptor().threshold, 0.5);
        assert!(model.probability_estimator().is_some());
        assert_eq!(model.version(), "2024.1");
    }

    #[test]
    fn logit_combines_numeric_and_one_hot_weights() {
        let model = LinearChurnModel::from_reader(DESCRIPTOR.as_bytes()).expect("model loads");
        let vector = features(ContractType::MonthToMonth, 10);

        // -0.5 - 0.5 + 0.8 + 1.0 + 0.5; TotalCharges and PaperlessBilling carry no weight.
        assert!((model.logit(&vector) - 1.3).abs() < 1e-9);
        assert_eq!(model.predict_label(&vector), Ok(ChurnLabel::Churn));

        let probabilities = model
            .predict_probabilities(&vector)
            .expect("probabilities computed");
        assert!((probabilities.stay + probabilities.churn - 1.0).abs() < 1e-12);
        assert!(probabilities.churn > 0.5);
    }

    #[test]
    fn long_contracts_predict_stay() {
        let model = LinearChurnModel::from_reader(DESCRIPTOR.as_bytes()).expect("model loads");
        let vector = features(ContractType::TwoYear, 60);
        assert_eq!(model.predict_label(&vector), Ok(ChurnLabel::Stay));
    }

    #[test]
    fn label_only_descriptor_hides_probability_capability() {
        let raw = DESCRIPTOR.replacen("\"intercept\"", "\"probability\": false, \"intercept\"", 1);
        let model = LinearChurnModel::from_reader(raw.as_bytes()).expect("model loads");
        assert!(model.probability_estimator().is_none());
    }

    #[test]
    fn rejects_unknown_columns_and_bad_thresholds() {
        let unknown = r#"{ "name": "m", "intercept": 0.0, "numeric": { "SeniorCitizen": 1.0 } }"#;
        match LinearChurnModel::from_reader(unknown.as_bytes()) {
            Err(ModelLoadError::Invalid(reason)) => assert!(reason.contains("SeniorCitizen")),
            other => panic!("expected invalid descriptor, got {other:?}"),
        }

        let threshold = r#"{ "name": "m", "intercept": 0.0, "threshold": 1.0 }"#;
        assert!(matches!(
            LinearChurnModel::from_reader(threshold.as_bytes()),
            Err(ModelLoadError::Invalid(_))
        ));

        assert!(matches!(
            LinearChurnModel::from_reader(&b"not json"[..]),
            Err(ModelLoadError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            LinearChurnModel::from_path("does/not/exist.json"),
            Err(ModelLoadError::Io(_))
        ));
    }
}
