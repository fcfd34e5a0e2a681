use super::super::domain::{ContractType, CustomerProfile, InternetService, PaperlessBilling};

/// One entry of the heuristic risk table.
#[derive(Clone, Copy)]
pub struct RiskRule {
    pub label: &'static str,
    pub points: u8,
    pub applies: fn(&CustomerProfile) -> bool,
}

impl std::fmt::Debug for RiskRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RiskRule")
            .field("label", &self.label)
            .field("points", &self.points)
            .finish()
    }
}

pub const LOW_TENURE_MONTHS: i64 = 12;
pub const HIGH_MONTHLY_CHARGE: f64 = 70.0;

/// Evaluation order matters for how factors are listed, not for the score.
pub const STANDARD_RULES: [RiskRule; 5] = [
    RiskRule {
        label: "Month-to-month contract",
        points: 30,
        applies: month_to_month,
    },
    RiskRule {
        label: "Fiber optic service",
        points: 20,
        applies: fiber_optic,
    },
    RiskRule {
        label: "Low tenure",
        points: 25,
        applies: low_tenure,
    },
    RiskRule {
        label: "High monthly charge",
        points: 15,
        applies: high_monthly_charge,
    },
    RiskRule {
        label: "Paperless billing",
        points: 10,
        applies: paperless_billing,
    },
];

fn month_to_month(profile: &CustomerProfile) -> bool {
    profile.contract() == Some(ContractType::MonthToMonth)
}

fn fiber_optic(profile: &CustomerProfile) -> bool {
    profile.internet() == Some(InternetService::FiberOptic)
}

fn low_tenure(profile: &CustomerProfile) -> bool {
    profile.tenure_months < LOW_TENURE_MONTHS
}

fn high_monthly_charge(profile: &CustomerProfile) -> bool {
    profile.monthly_charges > HIGH_MONTHLY_CHARGE
}

fn paperless_billing(profile: &CustomerProfile) -> bool {
    profile.paperless() == Some(PaperlessBilling::Yes)
}

pub(crate) fn tally(rules: &[RiskRule], profile: &CustomerProfile) -> (u32, Vec<String>) {
    let mut total: u32 = 0;
    let mut factors = Vec::new();

    for rule in rules {
        if (rule.applies)(profile) {
            total += u32::from(rule.points);
            factors.push(rule.label.to_string());
        }
    }

    (total, factors)
}
