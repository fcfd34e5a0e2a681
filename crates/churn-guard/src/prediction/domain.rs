use std::fmt;

use serde::{Deserialize, Serialize};

use super::risk::RiskAssessment;

/// Raw account attributes as captured from a form, CLI flags or a CSV row.
///
/// Categorical fields carry the labels used by the training data ("Month-to-month",
/// "Fiber optic", ...). Nothing here is validated; see [`super::FeatureVectorBuilder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerProfile {
    pub tenure_months: i64,
    pub monthly_charges: f64,
    pub total_charges: f64,
    pub paperless_billing: String,
    pub contract_type: String,
    pub internet_service: String,
}

impl Default for CustomerProfile {
    fn default() -> Self {
        Self {
            tenure_months: 12,
            monthly_charges: 70.0,
            total_charges: 800.0,
            paperless_billing: PaperlessBilling::Yes.label().to_string(),
            contract_type: ContractType::MonthToMonth.label().to_string(),
            internet_service: InternetService::Dsl.label().to_string(),
        }
    }
}

impl CustomerProfile {
    pub fn paperless(&self) -> Option<PaperlessBilling> {
        PaperlessBilling::parse(&self.paperless_billing)
    }

    pub fn contract(&self) -> Option<ContractType> {
        ContractType::parse(&self.contract_type)
    }

    pub fn internet(&self) -> Option<InternetService> {
        InternetService::parse(&self.internet_service)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaperlessBilling {
    Yes,
    No,
}

impl PaperlessBilling {
    pub const ALL: [Self; 2] = [Self::Yes, Self::No];

    pub const fn label(self) -> &'static str {
        match self {
            PaperlessBilling::Yes => "Yes",
            PaperlessBilling::No => "No",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        Self::ALL.into_iter().find(|value| value.label() == trimmed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractType {
    #[serde(rename = "Month-to-month")]
    MonthToMonth,
    #[serde(rename = "One year")]
    OneYear,
    #[serde(rename = "Two year")]
    TwoYear,
}

impl ContractType {
    pub const ALL: [Self; 3] = [Self::MonthToMonth, Self::OneYear, Self::TwoYear];

    pub const fn label(self) -> &'static str {
        match self {
            ContractType::MonthToMonth => "Month-to-month",
            ContractType::OneYear => "One year",
            ContractType::TwoYear => "Two year",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        Self::ALL.into_iter().find(|value| value.label() == trimmed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InternetService {
    #[serde(rename = "DSL")]
    Dsl,
    #[serde(rename = "Fiber optic")]
    FiberOptic,
    #[serde(rename = "No")]
    None,
}

impl InternetService {
    pub const ALL: [Self; 3] = [Self::Dsl, Self::FiberOptic, Self::None];

    pub const fn label(self) -> &'static str {
        match self {
            InternetService::Dsl => "DSL",
            InternetService::FiberOptic => "Fiber optic",
            InternetService::None => "No",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        Self::ALL.into_iter().find(|value| value.label() == trimmed)
    }
}

/// Validated model input. Field names follow the training-time column schema.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector {
    #[serde(rename = "tenure")]
    pub tenure: u8,
    #[serde(rename = "MonthlyCharges")]
    pub monthly_charges: f64,
    #[serde(rename = "TotalCharges")]
    pub total_charges: f64,
    #[serde(rename = "PaperlessBilling")]
    pub paperless_billing: PaperlessBilling,
    #[serde(rename = "Contract")]
    pub contract: ContractType,
    #[serde(rename = "InternetService")]
    pub internet_service: InternetService,
}

impl FeatureVector {
    pub const SCHEMA: [&'static str; 6] = [
        "tenure",
        "MonthlyCharges",
        "TotalCharges",
        "PaperlessBilling",
        "Contract",
        "InternetService",
    ];

    pub fn numeric(&self) -> [(&'static str, f64); 3] {
        [
            ("tenure", f64::from(self.tenure)),
            ("MonthlyCharges", self.monthly_charges),
            ("TotalCharges", self.total_charges),
        ]
    }

    pub fn categorical(&self) -> [(&'static str, &'static str); 3] {
        [
            ("PaperlessBilling", self.paperless_billing.label()),
            ("Contract", self.contract.label()),
            ("InternetService", self.internet_service.label()),
        ]
    }
}

/// Binary outcome reported by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChurnLabel {
    Stay,
    Churn,
}

impl ChurnLabel {
    pub const fn label(self) -> &'static str {
        match self {
            ChurnLabel::Stay => "Stay",
            ChurnLabel::Churn => "Churn",
        }
    }

    pub const fn headline(self) -> &'static str {
        match self {
            ChurnLabel::Stay => "expected to keep the subscription",
            ChurnLabel::Churn => "likely to cancel the subscription",
        }
    }
}

impl fmt::Display for ChurnLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where the reported probabilities came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbabilitySource {
    Model,
    Degenerate,
}

/// Final output of one prediction request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub label: ChurnLabel,
    pub churn_probability: f64,
    pub stay_probability: f64,
    pub probability_source: ProbabilitySource,
    pub risk_assessment: RiskAssessment,
    pub recommended_actions: Vec<String>,
}

impl PredictionResult {
    /// Probability (percent) attached to the predicted label.
    pub fn label_probability(&self) -> f64 {
        match self.label {
            ChurnLabel::Churn => self.churn_probability,
            ChurnLabel::Stay => self.stay_probability,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} ({:.1}% {}), heuristic risk {}/100",
            self.label,
            self.label_probability(),
            self.label.headline(),
            self.risk_assessment.score
        )
    }
}
