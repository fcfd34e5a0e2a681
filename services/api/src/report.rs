use churn_guard::prediction::{
    ChurnLabel, CustomerProfile, ImportedProfile, ModelInfo, PredictionError, PredictionResult,
    ProfileImportError,
};
use std::fmt::{self, Write};

pub(crate) fn render_prediction(
    profile: &CustomerProfile,
    prediction: &PredictionResult,
    model: &ModelInfo,
) -> String {
    let mut out = String::new();
    let risk = &prediction.risk_assessment;

    let _ = writeln!(out, "Customer churn prediction");
    let _ = writeln!(out, "Model: {} (version {})", model.name, model.version);

    let _ = writeln!(out, "\nCustomer profile");
    let _ = writeln!(out, "- Tenure: {} months", profile.tenure_months);
    let _ = writeln!(out, "- Monthly charges: ${:.2}", profile.monthly_charges);
    let _ = writeln!(out, "- Total charges: ${:.2}", profile.total_charges);
    let _ = writeln!(out, "- Paperless billing: {}", profile.paperless_billing);
    let _ = writeln!(out, "- Contract: {}", profile.contract_type);
    let _ = writeln!(out, "- Internet service: {}", profile.internet_service);

    let _ = writeln!(
        out,
        "\nRisk indicator: {}/100 ({} risk)",
        risk.score,
        risk.level.label()
    );
    if risk.has_factors() {
        for factor in &risk.triggered_factors {
            let _ = writeln!(out, "- {factor}");
        }
    } else {
        let _ = writeln!(out, "- no significant risk factors");
    }

    let _ = writeln!(
        out,
        "\nResult: {}, customer is {}",
        prediction.label,
        prediction.label.headline()
    );
    let _ = writeln!(
        out,
        "Probability of {}: {:.1}%",
        prediction.label,
        prediction.label_probability()
    );
    if !model.supports_probabilities {
        let _ = writeln!(
            out,
            "(model reports labels only; probabilities are a 0/100 split)"
        );
    }

    let _ = writeln!(out, "\nRecommended actions");
    for action in &prediction.recommended_actions {
        let _ = writeln!(out, "- {action}");
    }

    out
}

pub(crate) fn render_batch_line(
    imported: &ImportedProfile,
    outcome: &Result<PredictionResult, PredictionError>,
) -> String {
    match outcome {
        Ok(prediction) => format!(
            "{}: {} ({:.1}%), risk {}/100 [{}]",
            imported.display_id(),
            prediction.label,
            prediction.label_probability(),
            prediction.risk_assessment.score,
            prediction.risk_assessment.summary()
        ),
        Err(err) => format!("{}: skipped, {err}", imported.display_id()),
    }
}

pub(crate) fn render_unreadable_row(err: &ProfileImportError) -> String {
    format!("{err}, skipped")
}

/// Totals printed after a batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BatchSummary {
    pub(crate) scored: usize,
    pub(crate) churn: usize,
    pub(crate) rejected: usize,
}

impl BatchSummary {
    pub(crate) fn record(&mut self, label: ChurnLabel) {
        self.scored += 1;
        if label == ChurnLabel::Churn {
            self.churn += 1;
        }
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} profiles scored, {} predicted to churn, {} rejected",
            self.scored, self.churn, self.rejected
        )
    }
}
