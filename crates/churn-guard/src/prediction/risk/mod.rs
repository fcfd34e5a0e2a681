mod rules;

pub use rules::{RiskRule, HIGH_MONTHLY_CHARGE, LOW_TENURE_MONTHS, STANDARD_RULES};

use super::domain::CustomerProfile;
use serde::{Deserialize, Serialize};

pub const MAX_RISK_SCORE: u8 = 100;

/// Stateless scorer applying an additive rule table to a raw profile.
///
/// The scorer never consults the classifier; its output explains a prediction and is
/// never used to change one.
#[derive(Debug, Clone)]
pub struct RiskScorer {
    rules: Vec<RiskRule>,
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self::with_rules(STANDARD_RULES.to_vec())
    }
}

impl RiskScorer {
    pub fn with_rules(rules: Vec<RiskRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[RiskRule] {
        &self.rules
    }

    pub fn score(&self, profile: &CustomerProfile) -> RiskAssessment {
        let (total, triggered_factors) = rules::tally(&self.rules, profile);
        let score = total.min(u32::from(MAX_RISK_SCORE)) as u8;

        RiskAssessment {
            score,
            level: RiskLevel::from_score(score),
            triggered_factors,
        }
    }
}

/// Banding used by the dashboard risk meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub const fn from_score(score: u8) -> Self {
        if score < 40 {
            RiskLevel::Low
        } else if score < 70 {
            RiskLevel::Moderate
        } else {
            RiskLevel::High
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
        }
    }
}

/// Heuristic score with the factors that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub score: u8,
    pub level: RiskLevel,
    pub triggered_factors: Vec<String>,
}

impl RiskAssessment {
    pub fn has_factors(&self) -> bool {
        !self.triggered_factors.is_empty()
    }

    pub fn summary(&self) -> String {
        if self.has_factors() {
            format!("risk factors: {}", self.triggered_factors.join(", "))
        } else {
            "no significant risk factors".to_string()
        }
    }
}
