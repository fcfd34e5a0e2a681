use std::ops::RangeInclusive;

use super::domain::{
    ContractType, CustomerProfile, FeatureVector, InternetService, PaperlessBilling,
};

/// Validation errors raised while building a feature vector.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be between {min} and {max} (found {found})")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        found: f64,
    },
    #[error("{field} does not accept '{found}' (expected one of: {})", .expected.join(", "))]
    UnrecognizedValue {
        field: &'static str,
        found: String,
        expected: Vec<&'static str>,
    },
}

impl ValidationError {
    /// Name of the offending profile field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::OutOfRange { field, .. }
            | ValidationError::UnrecognizedValue { field, .. } => field,
        }
    }
}

/// Accepted ranges for the numeric profile fields.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldLimits {
    pub tenure_months: RangeInclusive<i64>,
    pub monthly_charges: RangeInclusive<f64>,
    pub total_charges: RangeInclusive<f64>,
}

impl Default for FieldLimits {
    fn default() -> Self {
        Self {
            tenure_months: 0..=100,
            monthly_charges: 0.0..=500.0,
            total_charges: 0.0..=10_000.0,
        }
    }
}

/// Turns raw profiles into the typed record the classifier consumes.
#[derive(Debug, Clone, Default)]
pub struct FeatureVectorBuilder {
    limits: FieldLimits,
}

impl FeatureVectorBuilder {
    /// Tenure limits are narrowed to what [`FeatureVector::tenure`] can hold.
    pub fn with_limits(mut limits: FieldLimits) -> Self {
        let start = (*limits.tenure_months.start()).max(0);
        let end = (*limits.tenure_months.end()).min(i64::from(u8::MAX));
        limits.tenure_months = start..=end;
        Self { limits }
    }

    pub fn limits(&self) -> &FieldLimits {
        &self.limits
    }

    pub fn build(&self, profile: &CustomerProfile) -> Result<FeatureVector, ValidationError> {
        let tenure = check_tenure(profile.tenure_months, &self.limits.tenure_months)?;
        let monthly_charges = check_decimal(
            "monthly_charges",
            profile.monthly_charges,
            &self.limits.monthly_charges,
        )?;
        let total_charges = check_decimal(
            "total_charges",
            profile.total_charges,
            &self.limits.total_charges,
        )?;

        let paperless_billing = profile.paperless().ok_or_else(|| {
            unrecognized(
                "paperless_billing",
                &profile.paperless_billing,
                &PaperlessBilling::ALL.map(PaperlessBilling::label),
            )
        })?;
        let contract = profile.contract().ok_or_else(|| {
            unrecognized(
                "contract_type",
                &profile.contract_type,
                &ContractType::ALL.map(ContractType::label),
            )
        })?;
        let internet_service = profile.internet().ok_or_else(|| {
            unrecognized(
                "internet_service",
                &profile.internet_service,
                &InternetService::ALL.map(InternetService::label),
            )
        })?;

        Ok(FeatureVector {
            tenure,
            monthly_charges,
            total_charges,
            paperless_billing,
            contract,
            internet_service,
        })
    }
}

fn check_tenure(value: i64, range: &RangeInclusive<i64>) -> Result<u8, ValidationError> {
    let out_of_range = || ValidationError::OutOfRange {
        field: "tenure_months",
        min: *range.start() as f64,
        max: *range.end() as f64,
        found: value as f64,
    };

    if !range.contains(&value) {
        return Err(out_of_range());
    }
    u8::try_from(value).map_err(|_| out_of_range())
}

fn check_decimal(
    field: &'static str,
    value: f64,
    range: &RangeInclusive<f64>,
) -> Result<f64, ValidationError> {
    if value.is_finite() && range.contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::OutOfRange {
            field,
            min: *range.start(),
            max: *range.end(),
            found: value,
        })
    }
}

fn unrecognized(field: &'static str, found: &str, expected: &[&'static str]) -> ValidationError {
    ValidationError::UnrecognizedValue {
        field,
        found: found.to_string(),
        expected: expected.to_vec(),
    }
}
