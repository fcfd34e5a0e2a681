use super::domain::ChurnLabel;

pub const CHURN_ACTIONS: [&str; 4] = [
    "Offer a discount or special promotion",
    "Contact the customer for feedback",
    "Provide a free service upgrade",
    "Propose a long-term contract with incentives",
];

pub const STAY_ACTIONS: [&str; 3] = [
    "Maintain service quality",
    "Offer a loyalty program",
    "Upsell additional services",
];

/// Retention playbook for a predicted label.
pub fn recommended_actions(label: ChurnLabel) -> &'static [&'static str] {
    match label {
        ChurnLabel::Churn => &CHURN_ACTIONS,
        ChurnLabel::Stay => &STAY_ACTIONS,
    }
}
